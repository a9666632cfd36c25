/// Declared type of a column.
///
/// This is descriptive metadata only: values stored in a column are never
/// checked against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// A 64-bit signed integer.
    Int,
    /// A 64-bit floating-point number.
    Float,
    /// A variable-length UTF-8 character string.
    Text,
    /// A boolean value (true or false).
    Bool,
}
