use std::fmt;
use std::str::FromStr;

use serde::de::{Deserializer, Error as _};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::discovery::languages::{
    GoPackage, JavaProject, NodeJsPackage, PythonModule, PythonPackage, RubyApp, RubyGem,
};
use crate::error::UnitError;

/// A source unit: one package, module or project of some ecosystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unit {
    GoPackage(GoPackage),
    NodeJsPackage(NodeJsPackage),
    PythonPackage(PythonPackage),
    PythonModule(PythonModule),
    RubyGem(RubyGem),
    RubyApp(RubyApp),
    JavaProject(JavaProject),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnitKind {
    GoPackage,
    NodeJsPackage,
    PythonPackage,
    PythonModule,
    RubyGem,
    RubyApp,
    JavaProject,
}

impl UnitKind {
    pub const ALL: [UnitKind; 7] = [
        UnitKind::GoPackage,
        UnitKind::NodeJsPackage,
        UnitKind::PythonPackage,
        UnitKind::PythonModule,
        UnitKind::RubyGem,
        UnitKind::RubyApp,
        UnitKind::JavaProject,
    ];

    /// The tag used when serializing units of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitKind::GoPackage => "GoPackage",
            UnitKind::NodeJsPackage => "NodeJSPackage",
            UnitKind::PythonPackage => "PythonPackage",
            UnitKind::PythonModule => "PythonModule",
            UnitKind::RubyGem => "RubyGem",
            UnitKind::RubyApp => "RubyApp",
            UnitKind::JavaProject => "JavaProject",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitKind {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnitError::unhandled_type(s))
    }
}

impl Unit {
    pub fn kind(&self) -> UnitKind {
        match self {
            Unit::GoPackage(_) => UnitKind::GoPackage,
            Unit::NodeJsPackage(_) => UnitKind::NodeJsPackage,
            Unit::PythonPackage(_) => UnitKind::PythonPackage,
            Unit::PythonModule(_) => UnitKind::PythonModule,
            Unit::RubyGem(_) => UnitKind::RubyGem,
            Unit::RubyApp(_) => UnitKind::RubyApp,
            Unit::JavaProject(_) => UnitKind::JavaProject,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// The unit's directory, or file for a Python module, relative to the
    /// base the scan was configured with.
    pub fn path(&self) -> &str {
        match self {
            Unit::GoPackage(u) => &u.dir,
            Unit::NodeJsPackage(u) => &u.dir,
            Unit::PythonPackage(u) => &u.dir,
            Unit::PythonModule(u) => &u.file,
            Unit::RubyGem(u) => &u.dir,
            Unit::RubyApp(u) => &u.dir,
            Unit::JavaProject(u) => &u.dir,
        }
    }

    pub fn sort_key(&self) -> (&'static str, &str) {
        (self.type_name(), self.path())
    }

    /// Decodes the JSON body of a unit whose tag is `unit_type`.
    pub fn from_json(data: &[u8], unit_type: &str) -> Result<Unit, UnitError> {
        let kind: UnitKind = unit_type.parse()?;
        let err = |e| UnitError::json(unit_type, e);
        let unit = match kind {
            UnitKind::GoPackage => Unit::GoPackage(serde_json::from_slice(data).map_err(err)?),
            UnitKind::NodeJsPackage => {
                Unit::NodeJsPackage(serde_json::from_slice(data).map_err(err)?)
            }
            UnitKind::PythonPackage => {
                Unit::PythonPackage(serde_json::from_slice(data).map_err(err)?)
            }
            UnitKind::PythonModule => {
                Unit::PythonModule(serde_json::from_slice(data).map_err(err)?)
            }
            UnitKind::RubyGem => Unit::RubyGem(serde_json::from_slice(data).map_err(err)?),
            UnitKind::RubyApp => Unit::RubyApp(serde_json::from_slice(data).map_err(err)?),
            UnitKind::JavaProject => Unit::JavaProject(serde_json::from_slice(data).map_err(err)?),
        };
        Ok(unit)
    }

    /// Encodes the unit body without its tag.
    pub fn to_json(&self) -> Result<Vec<u8>, UnitError> {
        let err = |e| UnitError::json(self.type_name(), e);
        match self {
            Unit::GoPackage(u) => serde_json::to_vec(u).map_err(err),
            Unit::NodeJsPackage(u) => serde_json::to_vec(u).map_err(err),
            Unit::PythonPackage(u) => serde_json::to_vec(u).map_err(err),
            Unit::PythonModule(u) => serde_json::to_vec(u).map_err(err),
            Unit::RubyGem(u) => serde_json::to_vec(u).map_err(err),
            Unit::RubyApp(u) => serde_json::to_vec(u).map_err(err),
            Unit::JavaProject(u) => serde_json::to_vec(u).map_err(err),
        }
    }
}

/// Sorts by `(type tag, path)`, the order used for display and comparison.
pub fn sort_units(units: &mut [Unit]) {
    units.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}

// A tagged unit is `{"Type": "<tag>", "Unit": {...}}`.

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Unit", 2)?;
        state.serialize_field("Type", self.type_name())?;
        match self {
            Unit::GoPackage(u) => state.serialize_field("Unit", u)?,
            Unit::NodeJsPackage(u) => state.serialize_field("Unit", u)?,
            Unit::PythonPackage(u) => state.serialize_field("Unit", u)?,
            Unit::PythonModule(u) => state.serialize_field("Unit", u)?,
            Unit::RubyGem(u) => state.serialize_field("Unit", u)?,
            Unit::RubyApp(u) => state.serialize_field("Unit", u)?,
            Unit::JavaProject(u) => state.serialize_field("Unit", u)?,
        }
        state.end()
    }
}

#[derive(Deserialize)]
struct TaggedRecord {
    #[serde(rename = "Type")]
    unit_type: String,
    #[serde(rename = "Unit")]
    unit: Box<RawValue>,
}

impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = TaggedRecord::deserialize(deserializer)?;
        Unit::from_json(record.unit.get().as_bytes(), &record.unit_type).map_err(D::Error::custom)
    }
}
