use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::ops::Index;
use std::sync::Arc;

use raylib::prelude::*;

use crate::theme::{BLUE_600, BLUE_700, BLUE_800, BLUE_900};

/// Decorative watermark placement inside a card, as CSS-like edge offsets.
///
/// At most two offsets are set. An unset axis keeps the watermark aligned to
/// the card's top-left corner on that axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WatermarkPosition {
    top: Option<f32>,
    right: Option<f32>,
    bottom: Option<f32>,
    left: Option<f32>,
}

impl WatermarkPosition {
    pub const MAX_OFFSETS: usize = 2;

    pub fn new(
        top: Option<f32>,
        right: Option<f32>,
        bottom: Option<f32>,
        left: Option<f32>,
    ) -> Result<Self, DatasetError> {
        let position = Self { top, right, bottom, left };
        let count = position.offset_count();
        if count > Self::MAX_OFFSETS {
            return Err(DatasetError::TooManyOffsets(count));
        }
        Ok(position)
    }

    pub fn top_left(top: f32, left: f32) -> Self {
        Self { top: Some(top), left: Some(left), ..Self::default() }
    }

    pub fn top_right(top: f32, right: f32) -> Self {
        Self { top: Some(top), right: Some(right), ..Self::default() }
    }

    pub fn bottom_right(bottom: f32, right: f32) -> Self {
        Self { bottom: Some(bottom), right: Some(right), ..Self::default() }
    }

    pub fn bottom_left(bottom: f32, left: f32) -> Self {
        Self { bottom: Some(bottom), left: Some(left), ..Self::default() }
    }

    pub fn top(&self) -> Option<f32> {
        self.top
    }

    pub fn right(&self) -> Option<f32> {
        self.right
    }

    pub fn bottom(&self) -> Option<f32> {
        self.bottom
    }

    pub fn left(&self) -> Option<f32> {
        self.left
    }

    pub fn offset_count(&self) -> usize {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .filter(|offset| offset.is_some())
            .count()
    }

    /// Top-left corner of a `size`-sided watermark placed inside `card`.
    /// `left` wins over `right` and `top` over `bottom`.
    pub fn resolve(&self, card: Rectangle, size: f32) -> Vector2 {
        let x = match (self.left, self.right) {
            (Some(left), _) => card.x + left,
            (None, Some(right)) => card.x + card.width - right - size,
            (None, None) => card.x,
        };
        let y = match (self.top, self.bottom) {
            (Some(top), _) => card.y + top,
            (None, Some(bottom)) => card.y + card.height - bottom - size,
            (None, None) => card.y,
        };
        Vector2::new(x, y)
    }
}

/// One static content entry displayed as a card.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitteeRecord {
    pub name: String,
    pub description: String,
    pub link: String,
    pub color: Color,
    pub watermark: WatermarkPosition,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DatasetError {
    #[error("the committee list is empty")]
    Empty,
    #[error("committee name '{0}' appears more than once")]
    DuplicateName(String),
    #[error("a watermark takes at most two offsets, got {0}")]
    TooManyOffsets(usize),
}

/// Immutable, ordered, non-empty list of committees.
///
/// Cloning shares the same records; nothing can be pushed, removed or edited
/// once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Committees {
    records: Arc<[CommitteeRecord]>,
    len: NonZeroUsize,
}

impl Committees {
    pub fn new(records: Vec<CommitteeRecord>) -> Result<Self, DatasetError> {
        let len = NonZeroUsize::new(records.len()).ok_or(DatasetError::Empty)?;
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.name.as_str()) {
                return Err(DatasetError::DuplicateName(record.name.clone()));
            }
        }
        Ok(Self { records: records.into(), len })
    }

    pub fn len(&self) -> usize {
        self.len.get()
    }

    pub fn non_zero_len(&self) -> NonZeroUsize {
        self.len
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommitteeRecord> {
        self.records.iter()
    }
}

impl Index<usize> for Committees {
    type Output = CommitteeRecord;

    fn index(&self, index: usize) -> &CommitteeRecord {
        &self.records[index]
    }
}

impl Default for Committees {
    fn default() -> Self {
        Self { records: Arc::from(default_records()), len: DEFAULT_COUNT }
    }
}

const DEFAULT_COUNT: NonZeroUsize = NonZeroUsize::new(4).unwrap();

fn default_records() -> [CommitteeRecord; DEFAULT_COUNT.get()] {
    let record = |name: &str, description: &str, link: &str, color, watermark| CommitteeRecord {
        name: name.to_string(),
        description: description.to_string(),
        link: link.to_string(),
        color,
        watermark,
    };

    [
        record(
            "UNHRC",
            "The Human Rights Council is an inter-governmental body responsible for promoting and protecting human rights around the globe.",
            "https://forms.gle/1r86TkH4Wp1i9TRZ9",
            BLUE_900,
            WatermarkPosition::top_left(-80.0, -80.0),
        ),
        record(
            "ECOSOC",
            "The Economic and Social Council is at the heart of the UN system to advance the three dimensions of sustainable development.",
            "https://forms.gle/sPzVugn3A3gwwunW9",
            BLUE_800,
            WatermarkPosition::top_right(-80.0, -80.0),
        ),
        record(
            "SPECPOL",
            "The Special Political and Decolonization Committee deals with a variety of subjects including decolonization and peacekeeping.",
            "https://forms.gle/Sb6F6ZGXru1iMv1m8",
            BLUE_700,
            WatermarkPosition::bottom_right(-80.0, -80.0),
        ),
        record(
            "DISEC",
            "The Disarmament and International Security Committee addresses global challenges related to disarmament, arms control, and threats to international peace and security.",
            "https://forms.gle/BLeympn2DAjMeYfG6",
            BLUE_600,
            WatermarkPosition::bottom_left(-80.0, -80.0),
        ),
    ]
}
