use raylib::prelude::*;

use crate::committee::CommitteeRecord;
use crate::constants::*;
use crate::geometry::*;
use crate::splash::SplashPhase;
use crate::text::TextMeasure;
use crate::texture_loader::Assets;
use crate::theme::*;
use crate::view::ShowcaseView;
use crate::viewport::HeaderStyle;

const HEADER_TITLE_SIZE: i32 = 34;
const HEADER_SUBTITLE_SIZE: i32 = 24;
const LOGO_SIZE: f32 = 40.0;
const SPLASH_ICON_SIZE: f32 = 80.0;
const CARD_RADIUS: f32 = 16.0;

/// Draws one frame of the page, back to front.
pub fn draw_view<D: RaylibDraw>(d: &mut D, view: &ShowcaseView, assets: &Assets, measure: &dyn TextMeasure) {
    let page = view.geometry();
    let alpha = view.splash().content_opacity();

    d.clear_background(PAGE_BACKGROUND);

    if let Some(field) = view.particles() {
        let origin = view.layer_origin();
        let (width, height) = field.size();
        d.draw_rectangle_rec(
            Rectangle::new(origin.x, origin.y, width, height),
            with_opacity(field.background(), alpha),
        );
        field.draw(d, origin, alpha);
    }

    draw_header(d, view, assets, measure, alpha);

    for (card, committee) in page.cards.iter().zip(view.committees().iter()) {
        if page.is_visible(&card.rect) {
            draw_card(d, card, committee, assets, measure, view.pointer(), alpha);
        }
    }

    draw_controls(d, page, view.pointer(), alpha);
    draw_footer(d, page, view.pointer(), alpha);

    if view.splash().phase() != SplashPhase::Ready {
        draw_splash(d, view, assets);
    }
}

fn draw_header<D: RaylibDraw>(d: &mut D, view: &ShowcaseView, assets: &Assets, measure: &dyn TextMeasure, alpha: f32) {
    let page = view.geometry();
    let layout = view.layout();
    let top = page.height * layout.header_top + 16.0;
    let color = with_opacity(TEXT_PRIMARY, alpha);

    match layout.header {
        HeaderStyle::Full => {
            let title = "GSL Tournament";
            let title_width = measure.text_width(title, HEADER_TITLE_SIZE);
            let x = (page.width - LOGO_SIZE - 16.0 - title_width) / 2.0;
            let logo = Rectangle::new(x, top, LOGO_SIZE, LOGO_SIZE);
            draw_icon(d, assets.icon.as_ref(), logo, alpha);
            d.draw_text(
                title,
                (x + LOGO_SIZE + 16.0) as i32,
                (top + (LOGO_SIZE - HEADER_TITLE_SIZE as f32) / 2.0) as i32,
                HEADER_TITLE_SIZE,
                color,
            );
        }
        HeaderStyle::Compact => {
            let title = "DPMUN GSL";
            let title_width = measure.text_width(title, HEADER_TITLE_SIZE);
            d.draw_text(title, ((page.width - title_width) / 2.0) as i32, top as i32, HEADER_TITLE_SIZE, color);

            let subtitle = "Tournament";
            let trophy = 27.0;
            let subtitle_width = measure.text_width(subtitle, HEADER_SUBTITLE_SIZE);
            let x = (page.width - subtitle_width - 8.0 - trophy) / 2.0;
            let y = top + HEADER_TITLE_SIZE as f32 + 4.0;
            d.draw_text(subtitle, x as i32, y as i32, HEADER_SUBTITLE_SIZE, color);
            draw_trophy(d, Rectangle::new(x + subtitle_width + 8.0, y - 2.0, trophy, trophy), color);
        }
    }
}

fn draw_card<D: RaylibDraw>(
    d: &mut D,
    card: &CardGeometry,
    committee: &CommitteeRecord,
    assets: &Assets,
    measure: &dyn TextMeasure,
    pointer: Option<Vector2>,
    alpha: f32,
) {
    let rect = card.rect;
    let roundness = 2.0 * CARD_RADIUS / rect.width.min(rect.height);

    // Shadow, standing in for the backdrop blur
    d.draw_rectangle_rounded(
        Rectangle::new(rect.x - 4.0, rect.y + 6.0, rect.width + 8.0, rect.height + 8.0),
        roundness,
        12,
        with_opacity(Color::BLACK, 0.35 * alpha),
    );
    d.draw_rectangle_rounded(rect, roundness, 12, with_opacity(committee.color, alpha));

    {
        let watermark = committee.watermark.resolve(rect, WATERMARK_SIZE);
        let mut s = d.begin_scissor_mode(rect.x as i32, rect.y as i32, rect.width as i32, rect.height as i32);
        let tint = with_opacity(Color::WHITE, WATERMARK_OPACITY * alpha);
        match assets.watermark.as_ref() {
            Some(texture) => s.draw_texture_pro(
                texture,
                Rectangle::new(0.0, 0.0, texture.width() as f32, texture.height() as f32),
                Rectangle::new(watermark.x, watermark.y, WATERMARK_SIZE, WATERMARK_SIZE),
                Vector2::new(0.0, 0.0),
                0.0,
                tint,
            ),
            None => s.draw_circle_v(
                Vector2::new(watermark.x + WATERMARK_SIZE / 2.0, watermark.y + WATERMARK_SIZE / 2.0),
                WATERMARK_SIZE / 2.0,
                tint,
            ),
        }
    }

    let text = with_opacity(TEXT_PRIMARY, alpha);
    let title_width = measure.text_width(&committee.name, card.title_size);
    d.draw_text(
        &committee.name,
        (rect.x + (rect.width - title_width) / 2.0) as i32,
        (rect.y + card.padding) as i32,
        card.title_size,
        text,
    );

    let description = with_opacity(TEXT_PRIMARY, 0.9 * alpha);
    let mut y = rect.y + card.padding + card.title_size as f32 + 16.0;
    for line in &card.lines {
        let width = measure.text_width(line, DESCRIPTION_SIZE);
        d.draw_text(line, (rect.x + (rect.width - width) / 2.0) as i32, y as i32, DESCRIPTION_SIZE, description);
        y += DESCRIPTION_LINE;
    }

    d.draw_line_ex(
        Vector2::new(rect.x + card.padding, card.divider_y),
        Vector2::new(rect.x + rect.width - card.padding, card.divider_y),
        1.0,
        with_opacity(DIVIDER, alpha),
    );

    let button = card.register;
    let hovered = pointer.is_some_and(|p| button.check_collision_point_rec(p));
    if hovered {
        d.draw_rectangle_rec(button, with_opacity(Color::WHITE, 0.1 * alpha));
    }
    let border = if hovered { 0.7 } else { 0.3 };
    d.draw_rectangle_lines_ex(button, 1.0, with_opacity(Color::WHITE, border * alpha));
    let label_width = measure.text_width(REGISTER_LABEL, BUTTON_TEXT_SIZE);
    d.draw_text(
        REGISTER_LABEL,
        (button.x + (button.width - label_width) / 2.0) as i32,
        (button.y + (button.height - BUTTON_TEXT_SIZE as f32) / 2.0) as i32,
        BUTTON_TEXT_SIZE,
        text,
    );
}

fn draw_controls<D: RaylibDraw>(d: &mut D, page: &PageGeometry, pointer: Option<Vector2>, alpha: f32) {
    for (rect, pointing_left) in [(page.previous, true), (page.next, false)] {
        let hovered = pointer.is_some_and(|p| rect.check_collision_point_rec(p));
        let color = with_opacity(if hovered { BLUE_500 } else { TEXT_PRIMARY }, alpha);

        let cx = rect.x + rect.width / 2.0;
        let cy = rect.y + rect.height / 2.0;
        let half = (rect.width - 16.0) / 4.0;
        if pointing_left {
            d.draw_triangle(
                Vector2::new(cx - half, cy),
                Vector2::new(cx + half / 2.0, cy + half),
                Vector2::new(cx + half / 2.0, cy - half),
                color,
            );
        } else {
            d.draw_triangle(
                Vector2::new(cx + half, cy),
                Vector2::new(cx - half / 2.0, cy - half),
                Vector2::new(cx - half / 2.0, cy + half),
                color,
            );
        }
    }
}

fn draw_footer<D: RaylibDraw>(d: &mut D, page: &PageGeometry, pointer: Option<Vector2>, alpha: f32) {
    let origin = page.footer_origin;
    d.draw_text(FOOTER_PREFIX, origin.x as i32, origin.y as i32, FOOTER_SIZE, with_opacity(TEXT_PRIMARY, alpha));

    let link = page.footer_link;
    let (x, y) = (link.x as i32, origin.y as i32);
    let hovered = pointer.is_some_and(|p| link.check_collision_point_rec(p));
    if hovered {
        // Split-shadow glitch on hover
        d.draw_text(FOOTER_LABEL, x - 2, y - 2, FOOTER_SIZE, with_opacity(BLUE_900, alpha));
        d.draw_text(FOOTER_LABEL, x + 2, y + 2, FOOTER_SIZE, with_opacity(BLUE_500, alpha));
    }
    let color = if hovered { BLUE_400 } else { BLUE_300 };
    d.draw_text(FOOTER_LABEL, x, y, FOOTER_SIZE, with_opacity(color, alpha));
}

fn draw_splash<D: RaylibDraw>(d: &mut D, view: &ShowcaseView, assets: &Assets) {
    let page = view.geometry();
    let splash = view.splash();
    let overlay = splash.overlay_opacity();
    d.draw_rectangle_rec(
        Rectangle::new(0.0, 0.0, page.width, page.height),
        with_opacity(Color::BLACK, overlay),
    );

    let (opacity, scale) = splash.icon_state();
    let size = SPLASH_ICON_SIZE * scale;
    let rect = Rectangle::new((page.width - size) / 2.0, (page.height - size) / 2.0, size, size);
    draw_icon(d, assets.icon.as_ref(), rect, opacity * overlay);
}

fn draw_icon<D: RaylibDraw>(d: &mut D, icon: Option<&Texture2D>, rect: Rectangle, alpha: f32) {
    match icon {
        Some(texture) => d.draw_texture_pro(
            texture,
            Rectangle::new(0.0, 0.0, texture.width() as f32, texture.height() as f32),
            rect,
            Vector2::new(0.0, 0.0),
            0.0,
            with_opacity(Color::WHITE, alpha),
        ),
        None => {
            let center = Vector2::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
            d.draw_circle_v(center, rect.width / 2.0, with_opacity(BLUE_700, alpha));
            d.draw_circle_v(center, rect.width / 4.0, with_opacity(TEXT_PRIMARY, alpha));
        }
    }
}

fn draw_trophy<D: RaylibDraw>(d: &mut D, rect: Rectangle, color: Color) {
    let cup = Rectangle::new(rect.x + rect.width * 0.2, rect.y, rect.width * 0.6, rect.height * 0.5);
    d.draw_rectangle_rounded(cup, 0.5, 8, color);
    d.draw_rectangle_rec(
        Rectangle::new(rect.x + rect.width * 0.45, rect.y + rect.height * 0.5, rect.width * 0.1, rect.height * 0.3),
        color,
    );
    d.draw_rectangle_rec(
        Rectangle::new(rect.x + rect.width * 0.25, rect.y + rect.height * 0.8, rect.width * 0.5, rect.height * 0.15),
        color,
    );
}
