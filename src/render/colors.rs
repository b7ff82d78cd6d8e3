//! Colors used by the shelf grid, as CSS strings usable directly by Canvas 2D.

/// A CSS color string (e.g., "#FF0000")
pub type CssColor = &'static str;

/// Fixed drawing colors.
pub mod palette {
    pub const BLACK: &str = "#000000";
    pub const WHITE: &str = "#FFFFFF";

    /// Front face of an unselected shelf (light gray)
    pub const FRONT_FACE: &str = "#D3D3D3";
    /// Front face of a selected shelf (light blue)
    pub const FRONT_FACE_SELECTED: &str = "#ADD8E6";
    /// Top edge, lighter than the front
    pub const TOP_FACE: &str = "#F0F0F0";
    /// Right edge, darker than the front
    pub const RIGHT_FACE: &str = "#C0C0C0";

    pub const OUTLINE: &str = BLACK;
    pub const LABEL_TEXT: &str = BLACK;
    /// Dashed drag rectangle
    pub const DRAG_RECT: &str = "#0000FF";
}

/// Category text colors, dark and high contrast against the gray faces.
///
/// Assigned in order of first appearance; past the sixteenth category the
/// list wraps around.
pub const CATEGORY_COLORS: [CssColor; 16] = [
    "#00008B", // dark blue
    "#006400", // dark green
    "#8B0000", // dark red
    "#551A8B", // purple
    "#FF8C00", // dark orange
    "#8B4513", // saddle brown
    "#8B0A50", // deep pink
    "#008080", // teal
    "#8B008B", // dark magenta
    "#808000", // olive
    "#000080", // navy
    "#8B3E2F", // coral
    "#DAA520", // goldenrod
    "#9400D3", // dark violet
    "#2E8B57", // sea green
    "#4B0082", // indigo
];
