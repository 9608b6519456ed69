// Spec-file format constants shared by the parser and the CLI

/// Marker separating a line's field descriptor from its expected output
pub const OUTPUT_MARKER: &str = "Output:";

/// The expected output starts after the marker and one space
pub const OUTPUT_PREFIX: &str = "Output: ";

/// Delimiter that precedes every field value (`Label: value`)
pub const FIELD_DELIMITER: &str = ": ";

/// Separator between the values of one field list
pub const VALUE_TERMINATOR: u8 = b' ';

/// Separator used when feeding inputs to the target program
pub const INPUT_SEPARATOR: &str = "\n";

/// Separator used when joining the target program's output lines
pub const OUTPUT_JOINER: &str = " ";
