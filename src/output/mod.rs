mod formatter;

pub use formatter::OutputFormatter;
