//! The layout stack: one indentation column per open block.

/// Column width at which a block's statements align (tabs count as `TAB_WIDTH` columns).
pub type IndentLevel = u32;

/// Ordered stack of open block indentation levels; the top is the innermost block.
///
/// ## Notes
/// - An empty stack behaves like a block at column 0 (see [`LayoutStack::top_or_base`]).
/// - Levels opened by the layout rule strictly increase towards the top. Levels pushed after an explicit `{`
///   record wherever the block's first token landed and carry no ordering guarantee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LayoutStack {
    levels: Vec<IndentLevel>,
}

impl LayoutStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from levels listed bottom to top.
    pub fn from_levels(levels: Vec<IndentLevel>) -> Self {
        Self { levels }
    }

    pub fn push(&mut self, level: IndentLevel) {
        self.levels.push(level);
    }

    pub fn pop(&mut self) -> Option<IndentLevel> {
        self.levels.pop()
    }

    pub fn top(&self) -> Option<IndentLevel> {
        self.levels.last().copied()
    }

    /// Top level, or column 0 when no block is open.
    pub fn top_or_base(&self) -> IndentLevel {
        self.top().unwrap_or(0)
    }

    /// Pop every level deeper than `indent`; return how many were closed.
    pub fn pop_above(&mut self, indent: IndentLevel) -> u32 {
        let mut closed = 0;
        while self.top().is_some_and(|top| top > indent) {
            self.levels.pop();
            closed += 1;
        }
        closed
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Levels from bottom (outermost) to top (innermost).
    pub fn levels(&self) -> &[IndentLevel] {
        &self.levels
    }
}
