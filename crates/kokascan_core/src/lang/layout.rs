//! Layout constants shared by the scanner and its hosts.

/// Columns a tab advances the indent measure by.
///
/// ## Notes
/// - Width-based, not alignment-based: `" \t"` measures 9, not 8. Mixed tab/space indentation is legal in Koka,
///   so two lines that look aligned in an editor may measure differently.
pub const TAB_WIDTH: u32 = 8;

/// Byte capacity of the host's external scanner serialization buffer.
pub const SERIALIZATION_CAPACITY: usize = 1024;
