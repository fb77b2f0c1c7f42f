//! Declarative field layouts
//!
//! A [`Layout`] is an ordered, static list of [`FieldDescriptor`]s. Layouts nest:
//! a sub-record array points at another layout. The codec walks these tables; no
//! file kind has its own parsing code.

/// Wire shape of one field
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Latin-1 text in exactly this many bytes, padded on write
    FixedText(usize),
    /// Latin-1 text behind a u16 length prefix, at most `capacity` bytes long
    VbText(usize),
    Int16,
    Int32,
    /// Also used for the game's 64-bit currency values
    Int64,
    Float32,
    Int16Array(usize),
    Int32Array(usize),
    Float32Array(usize),
    /// Opaque bytes, kept verbatim
    Reserved(usize),
    /// Exactly `n` nested records
    SubRecordArray(&'static Layout, usize),
    /// As many nested records as an earlier integer sibling says
    CountedSubRecordArray(&'static Layout, &'static str),
    /// Nested records until the buffer runs out
    TrailingSubRecordArray(&'static Layout),
}

impl FieldKind {
    /// Short name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::FixedText(_) => "FixedText",
            FieldKind::VbText(_) => "VbText",
            FieldKind::Int16 => "Int16",
            FieldKind::Int32 => "Int32",
            FieldKind::Int64 => "Int64",
            FieldKind::Float32 => "Float32",
            FieldKind::Int16Array(_) => "Int16Array",
            FieldKind::Int32Array(_) => "Int32Array",
            FieldKind::Float32Array(_) => "Float32Array",
            FieldKind::Reserved(_) => "Reserved",
            FieldKind::SubRecordArray(..) => "SubRecordArray",
            FieldKind::CountedSubRecordArray(..) => "CountedSubRecordArray",
            FieldKind::TrailingSubRecordArray(_) => "TrailingSubRecordArray",
        }
    }

    /// Width of one scalar element, for scalar and scalar-array kinds
    pub fn scalar_width(&self) -> Option<usize> {
        match self {
            FieldKind::Int16 | FieldKind::Int16Array(_) => Some(2),
            FieldKind::Int32 | FieldKind::Int32Array(_) => Some(4),
            FieldKind::Float32 | FieldKind::Float32Array(_) => Some(4),
            FieldKind::Int64 => Some(8),
            _ => None,
        }
    }

    /// Declared element count for fixed-length arrays
    pub fn element_count(&self) -> Option<usize> {
        match self {
            FieldKind::Int16Array(n)
            | FieldKind::Int32Array(n)
            | FieldKind::Float32Array(n)
            | FieldKind::SubRecordArray(_, n) => Some(*n),
            _ => None,
        }
    }

    /// Nested layout for sub-record arrays
    pub fn nested(&self) -> Option<&'static Layout> {
        match self {
            FieldKind::SubRecordArray(layout, _)
            | FieldKind::CountedSubRecordArray(layout, _)
            | FieldKind::TrailingSubRecordArray(layout) => Some(layout),
            _ => None,
        }
    }
}

/// How a field maps onto record slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Immediately after the previous field
    Packed,
    /// Alone in one record slot
    OwnSlot,
    /// Each array element in its own record slot
    SlotPerElement,
}

/// One named field of a layout
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    pub placement: Placement,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            placement: Placement::Packed,
        }
    }

    pub const fn own_slot(mut self) -> Self {
        self.placement = Placement::OwnSlot;
        self
    }

    pub const fn slot_per_element(mut self) -> Self {
        self.placement = Placement::SlotPerElement;
        self
    }

    /// Packed width when it does not depend on the data
    pub fn fixed_width(&self) -> Option<usize> {
        match self.kind {
            FieldKind::FixedText(n) | FieldKind::Reserved(n) => Some(n),
            FieldKind::VbText(_)
            | FieldKind::CountedSubRecordArray(..)
            | FieldKind::TrailingSubRecordArray(_) => None,
            FieldKind::Int16 | FieldKind::Int32 | FieldKind::Int64 | FieldKind::Float32 => {
                self.kind.scalar_width()
            }
            FieldKind::Int16Array(n) | FieldKind::Int32Array(n) | FieldKind::Float32Array(n) => {
                self.kind.scalar_width().map(|w| w * n)
            }
            FieldKind::SubRecordArray(layout, n) => layout.fixed_width().map(|w| w * n),
        }
    }

    /// Largest packed width the field can take, if bounded
    pub fn max_width(&self) -> Option<usize> {
        match self.kind {
            FieldKind::VbText(capacity) => Some(2 + capacity),
            FieldKind::SubRecordArray(layout, n) => layout.max_width().map(|w| w * n),
            FieldKind::CountedSubRecordArray(..) | FieldKind::TrailingSubRecordArray(_) => None,
            _ => self.fixed_width(),
        }
    }

    /// Smallest packed width the field can take
    pub fn min_width(&self) -> usize {
        match self.kind {
            FieldKind::VbText(_) => 2,
            FieldKind::SubRecordArray(layout, n) => layout.min_width() * n,
            FieldKind::CountedSubRecordArray(..) | FieldKind::TrailingSubRecordArray(_) => 0,
            _ => self.fixed_width().unwrap_or(0),
        }
    }
}

/// An ordered field table describing one record shape
#[derive(Debug)]
pub struct Layout {
    pub name: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl Layout {
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Index of a field in declaration order
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Packed width of the whole record, if every field has a fixed width
    pub fn fixed_width(&self) -> Option<usize> {
        self.fields.iter().map(FieldDescriptor::fixed_width).sum()
    }

    /// Largest packed width of the whole record, if bounded
    pub fn max_width(&self) -> Option<usize> {
        self.fields.iter().map(FieldDescriptor::max_width).sum()
    }

    /// Smallest packed width of the whole record
    pub fn min_width(&self) -> usize {
        self.fields.iter().map(FieldDescriptor::min_width).sum()
    }

    /// Packed byte offset of a field, if every field before it has a fixed width
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        let index = self.position(name)?;
        self.fields[..index]
            .iter()
            .map(FieldDescriptor::fixed_width)
            .sum()
    }
}
