use raylib::prelude::*;

use crate::committee::Committees;
use crate::constants::*;
use crate::text::{TextMeasure, wrap_text};
use crate::viewport::{ControlPlacement, Layout};

pub const DESCRIPTION_SIZE: i32 = 14;
pub const DESCRIPTION_LINE: f32 = 20.0;
pub const BUTTON_TEXT_SIZE: i32 = 14;
pub const BUTTON_HEIGHT: f32 = 36.0;
pub const FOOTER_SIZE: i32 = 12;
pub const FOOTER_HEIGHT: f32 = 36.0;
pub const REGISTER_LABEL: &str = "Write your GSL";
pub const FOOTER_PREFIX: &str = "Powered by ";
pub const FOOTER_LABEL: &str = "dpmun.i";

const GAP: f32 = 16.0;

/// Where a click landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Previous,
    Next,
    Register(usize),
    Footer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardGeometry {
    pub rect: Rectangle,
    pub padding: f32,
    pub title_size: i32,
    pub lines: Vec<String>,
    pub divider_y: f32,
    pub register: Rectangle,
}

/// Positions of everything clickable or card-shaped for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub container: Rectangle,
    pub cards: Vec<CardGeometry>,
    pub previous: Rectangle,
    pub next: Rectangle,
    pub footer_origin: Vector2,
    pub footer_link: Rectangle,
}

impl PageGeometry {
    /// `strip_offset` is the carousel's animated offset in percent of the strip.
    pub fn compute(
        committees: &Committees,
        layout: &Layout,
        width: f32,
        height: f32,
        strip_offset: f32,
        measure: &dyn TextMeasure,
    ) -> Self {
        let count = committees.len() as f32;
        let container_width = (width - 2.0 * GAP).clamp(0.0, CONTAINER_MAX_WIDTH);
        let main_height = height - FOOTER_HEIGHT;
        let center_y = main_height / 2.0;
        let container = Rectangle::new((width - container_width) / 2.0, 0.0, container_width, main_height);

        let card_width = (container_width - layout.card_inset).clamp(CARD_MIN_WIDTH, CARD_MAX_WIDTH);
        let strip_shift = strip_offset / 100.0 * count * container_width;

        let cards = committees
            .iter()
            .enumerate()
            .map(|(i, committee)| {
                let padding = layout.card_padding;
                let text_width = card_width - 2.0 * padding - GAP;
                let lines = wrap_text(&committee.description, text_width, DESCRIPTION_SIZE, measure);

                let card_height = 2.0 * padding
                    + layout.card_title_size as f32
                    + GAP
                    + lines.len() as f32 * DESCRIPTION_LINE
                    + 3.0 * GAP
                    + 1.0
                    + BUTTON_HEIGHT;

                let slot_x = container.x + i as f32 * container_width + strip_shift;
                let rect = Rectangle::new(
                    slot_x + (container_width - card_width) / 2.0,
                    center_y - card_height / 2.0,
                    card_width,
                    card_height,
                );

                let button_width = measure.text_width(REGISTER_LABEL, BUTTON_TEXT_SIZE) + 2.0 * 15.0;
                let register = Rectangle::new(
                    rect.x + (card_width - button_width) / 2.0,
                    rect.y + card_height - padding - BUTTON_HEIGHT,
                    button_width,
                    BUTTON_HEIGHT,
                );
                let divider_y = register.y - GAP - 1.0;

                CardGeometry { rect, padding, title_size: layout.card_title_size, lines, divider_y, register }
            })
            .collect();

        let button = layout.control_size + GAP;
        let (previous, next) = match layout.controls {
            ControlPlacement::Below => {
                let y = height * (1.0 - layout.controls_bottom) - button;
                (
                    Rectangle::new(width / 2.0 - button, y, button, button),
                    Rectangle::new(width / 2.0, y, button, button),
                )
            }
            ControlPlacement::Flanking => {
                let card_x = container.x + (container_width - card_width) / 2.0;
                let y = center_y - button / 2.0;
                (
                    Rectangle::new((card_x - button - GAP).max(0.0), y, button, button),
                    Rectangle::new((card_x + card_width + GAP).min(width - button), y, button, button),
                )
            }
        };

        let prefix_width = measure.text_width(FOOTER_PREFIX, FOOTER_SIZE);
        let link_width = measure.text_width(FOOTER_LABEL, FOOTER_SIZE);
        let footer_origin = Vector2::new(
            (width - prefix_width - link_width) / 2.0,
            height - (FOOTER_HEIGHT + FOOTER_SIZE as f32) / 2.0,
        );
        let footer_link = Rectangle::new(
            footer_origin.x + prefix_width,
            footer_origin.y - 4.0,
            link_width,
            FOOTER_SIZE as f32 + 8.0,
        );

        Self { width, height, container, cards, previous, next, footer_origin, footer_link }
    }

    /// Topmost clickable element under `point`.
    pub fn hit(&self, point: Vector2) -> Option<Hit> {
        if contains(&self.previous, point) {
            return Some(Hit::Previous);
        }
        if contains(&self.next, point) {
            return Some(Hit::Next);
        }
        if contains(&self.footer_link, point) {
            return Some(Hit::Footer);
        }
        self.cards
            .iter()
            .position(|card| self.is_visible(&card.rect) && contains(&card.register, point))
            .map(Hit::Register)
    }

    /// Whether any part of `rect` is inside the window.
    pub fn is_visible(&self, rect: &Rectangle) -> bool {
        rect.x < self.width && rect.x + rect.width > 0.0 && rect.y < self.height && rect.y + rect.height > 0.0
    }
}

fn contains(rect: &Rectangle, point: Vector2) -> bool {
    point.x >= rect.x && point.x < rect.x + rect.width && point.y >= rect.y && point.y < rect.y + rect.height
}
