use raylib::prelude::*;

use crate::carousel::CarouselController;
use crate::committee::Committees;
use crate::config::Settings;
use crate::constants::*;
use crate::geometry::{Hit, PageGeometry};
use crate::particles::{ParticleField, ParticleOptions};
use crate::splash::{SplashPhase, SplashSequencer};
use crate::task::ScopedTask;
use crate::text::TextMeasure;
use crate::viewport::{Layout, LayoutVariant, ViewportTracker};

/// What the host loop reports each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub width: i32,
    pub height: i32,
    pub pointer: Option<Vector2>,
    pub click: Option<Vector2>,
}

/// Side effects the view asks its host to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    OpenLink(String),
}

/// The whole page: carousel, layout selection, splash timeline and the
/// decorative background, each owned here and talking through plain values.
pub struct ShowcaseView {
    committees: Committees,
    carousel: CarouselController,
    tracker: ViewportTracker,
    variant: LayoutVariant,
    layout: Layout,
    splash: SplashSequencer,

    background: Option<ScopedTask<ParticleField>>,
    particles: Option<ParticleField>,

    width: i32,
    height: i32,
    pointer: Option<Vector2>,
    geometry: PageGeometry,

    autoplay: Option<f32>,
    autoplay_timer: f32,
}

impl ShowcaseView {
    /// Mounts the view: starts the splash clock and the background engine.
    pub fn mount(
        committees: Committees,
        settings: &Settings,
        width: i32,
        height: i32,
        measure: &dyn TextMeasure,
    ) -> std::io::Result<Self> {
        let carousel = CarouselController::new(committees.non_zero_len());
        let tracker = ViewportTracker::new(width, settings.layout.breakpoints);
        let variant = settings.layout.variant;
        let layout = Layout::select(tracker.flags(), width, variant);

        let (layer_width, layer_height) = layer_size(width, height, committees.len());
        let background = spawn_background(settings.particles.clone(), layer_width, layer_height)?;

        let geometry = PageGeometry::compute(
            &committees,
            &layout,
            width as f32,
            height as f32,
            carousel.strip_offset(),
            measure,
        );

        log::info!("mounted {} committees at {width}x{height}", committees.len());
        Ok(Self {
            committees,
            carousel,
            tracker,
            variant,
            layout,
            splash: SplashSequencer::new(),
            background: Some(background),
            particles: None,
            width,
            height,
            pointer: None,
            geometry,
            autoplay: None,
            autoplay_timer: 0.0,
        })
    }

    /// Advance the carousel on its own every `interval` seconds once revealed.
    pub fn with_autoplay(mut self, interval: f32) -> Self {
        self.autoplay = Some(interval);
        self
    }

    pub fn committees(&self) -> &Committees {
        &self.committees
    }

    pub fn carousel(&self) -> &CarouselController {
        &self.carousel
    }

    pub fn splash(&self) -> &SplashSequencer {
        &self.splash
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn particles(&self) -> Option<&ParticleField> {
        self.particles.as_ref()
    }

    pub fn pointer(&self) -> Option<Vector2> {
        self.pointer
    }

    /// The `init` flag: the background engine has delivered its field.
    pub fn is_background_ready(&self) -> bool {
        self.particles.is_some()
    }

    /// Left edge of the parallax layer, in window coordinates.
    pub fn layer_origin(&self) -> Vector2 {
        let overscan = self.committees.len() as f32 * PAN_AMOUNT;
        Vector2::new(-overscan / 2.0 + self.carousel.pan_offset(), 0.0)
    }

    pub fn update(&mut self, dt: f32, input: &FrameInput, measure: &dyn TextMeasure) -> Vec<ViewAction> {
        let mut actions = Vec::new();

        let resized = input.width != self.width || input.height != self.height;
        if resized {
            self.resize(input.width, input.height);
        }
        self.pointer = input.pointer;

        self.splash.update(dt);
        self.poll_background();

        if let Some(interval) = self.autoplay {
            if !self.splash.is_loading() {
                self.autoplay_timer += dt;
                while self.autoplay_timer >= interval {
                    self.autoplay_timer -= interval;
                    self.carousel.advance();
                }
            }
        }

        // The overlay swallows clicks until it is gone
        if let Some(click) = input.click {
            if self.splash.phase() == SplashPhase::Ready {
                match self.geometry.hit(click) {
                    Some(Hit::Previous) => self.carousel.retreat(),
                    Some(Hit::Next) => self.carousel.advance(),
                    Some(Hit::Register(index)) => {
                        let link = self.committees[index].link.clone();
                        log::info!("opening registration for {}", self.committees[index].name);
                        actions.push(ViewAction::OpenLink(link));
                    }
                    Some(Hit::Footer) => actions.push(ViewAction::OpenLink(FOOTER_LINK.to_string())),
                    None => {}
                }
            }
        }

        let moving = !self.carousel.is_settled();
        self.carousel.update(dt);

        let origin = self.layer_origin();
        if let Some(field) = self.particles.as_mut() {
            let pointer = self.pointer.map(|p| Vector2::new(p.x - origin.x, p.y - origin.y));
            field.update(dt, pointer);
        }

        if resized || moving {
            self.geometry = PageGeometry::compute(
                &self.committees,
                &self.layout,
                self.width as f32,
                self.height as f32,
                self.carousel.strip_offset(),
                measure,
            );
        }

        actions
    }

    /// Blocks until the background engine has delivered its field.
    pub fn wait_for_background(&mut self) {
        if self.is_background_ready() {
            return;
        }
        if let Some(task) = self.background.as_mut() {
            task.join();
        }
        self.poll_background();
    }

    /// Tears the view down, abandoning a background engine still at work.
    pub fn unmount(mut self) {
        if let Some(mut task) = self.background.take() {
            task.cancel();
        }
        log::info!("unmounted at card {}", self.carousel.current() + 1);
    }

    fn resize(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
        self.tracker.observe(width);
        // Re-selected on every resize: control sizes also follow the wide breakpoint
        self.layout = Layout::select(self.tracker.flags(), width, self.variant);
        let (layer_width, layer_height) = layer_size(width, height, self.committees.len());
        if let Some(field) = self.particles.as_mut() {
            field.resize(layer_width, layer_height);
        }
    }

    fn poll_background(&mut self) {
        let Some(task) = self.background.as_mut() else {
            return;
        };
        if let Some(mut field) = task.poll() {
            let (layer_width, layer_height) = layer_size(self.width, self.height, self.committees.len());
            field.resize(layer_width, layer_height);
            log::info!("particle engine ready with {} particles", field.particles().len());
            self.particles = Some(field);
            self.background = None;
        }
    }
}

fn layer_size(width: i32, height: i32, count: usize) -> (f32, f32) {
    (width as f32 + count as f32 * PAN_AMOUNT, height as f32)
}

fn spawn_background(options: ParticleOptions, width: f32, height: f32) -> std::io::Result<ScopedTask<ParticleField>> {
    ScopedTask::spawn("particle-engine", move |token| {
        if token.is_cancelled() {
            return None;
        }
        let mut rng = rand::rng();
        Some(ParticleField::seed(options, width, height, &mut rng))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::tests::MonoMeasure;
    use std::time::{Duration, Instant};

    fn mount(width: i32) -> ShowcaseView {
        ShowcaseView::mount(Committees::default(), &Settings::default(), width, 720, &MonoMeasure)
            .expect("spawn background")
    }

    fn idle(width: i32) -> FrameInput {
        FrameInput { width, height: 720, ..FrameInput::default() }
    }

    fn click(width: i32, at: Rectangle) -> FrameInput {
        let point = Vector2::new(at.x + at.width / 2.0, at.y + at.height / 2.0);
        FrameInput { width, height: 720, pointer: Some(point), click: Some(point) }
    }

    fn run_until_ready(view: &mut ShowcaseView) {
        for _ in 0..(FPS * 6) {
            view.update(FRAME_TIME, &idle(1280), &MonoMeasure);
        }
        assert_eq!(view.splash().phase(), SplashPhase::Ready);
    }

    #[test]
    fn mounts_loading_on_the_first_card() {
        let view = mount(1280);
        assert!(view.splash().is_loading());
        assert_eq!(view.carousel().current(), 0);
        assert_eq!(view.carousel().len(), 4);
    }

    #[test]
    fn clicks_are_ignored_under_the_overlay() {
        let mut view = mount(1280);
        let next = view.geometry().next;
        view.update(FRAME_TIME, &click(1280, next), &MonoMeasure);
        assert_eq!(view.carousel().current(), 0);
    }

    #[test]
    fn navigation_clicks_move_the_carousel() {
        let mut view = mount(1280);
        run_until_ready(&mut view);

        let next = view.geometry().next;
        view.update(FRAME_TIME, &click(1280, next), &MonoMeasure);
        view.update(FRAME_TIME, &click(1280, next), &MonoMeasure);
        assert_eq!(view.carousel().current(), 2);

        let previous = view.geometry().previous;
        for _ in 0..3 {
            view.update(FRAME_TIME, &click(1280, previous), &MonoMeasure);
        }
        assert_eq!(view.carousel().current(), 3);
    }

    #[test]
    fn register_click_opens_the_committee_link() {
        let mut view = mount(1280);
        run_until_ready(&mut view);

        let register = view.geometry().cards[0].register;
        let actions = view.update(FRAME_TIME, &click(1280, register), &MonoMeasure);
        assert_eq!(actions, [ViewAction::OpenLink(Committees::default()[0].link.clone())]);

        let footer = view.geometry().footer_link;
        let actions = view.update(FRAME_TIME, &click(1280, footer), &MonoMeasure);
        assert_eq!(actions, [ViewAction::OpenLink(FOOTER_LINK.to_string())]);
    }

    #[test]
    fn dataset_is_untouched_by_navigation() {
        let mut view = mount(1280);
        let before = view.committees().clone();
        run_until_ready(&mut view);
        for _ in 0..9 {
            let next = view.geometry().next;
            view.update(FRAME_TIME, &click(1280, next), &MonoMeasure);
        }
        assert_eq!(view.committees(), &before);
        assert_eq!(view.committees(), &Committees::default());
    }

    #[test]
    fn autoplay_waits_for_the_reveal() {
        let mut view = mount(1280).with_autoplay(1.0);
        view.update(SPLASH_DURATION - 0.1, &idle(1280), &MonoMeasure);
        assert_eq!(view.carousel().current(), 0);
        view.update(0.2, &idle(1280), &MonoMeasure);
        view.update(1.0, &idle(1280), &MonoMeasure);
        assert_eq!(view.carousel().current(), 1);
    }

    #[test]
    fn background_arrives_independently_of_the_splash() {
        let mut view = mount(1280);
        let deadline = Instant::now() + Duration::from_secs(10);
        while !view.is_background_ready() && Instant::now() < deadline {
            view.update(0.0, &idle(1280), &MonoMeasure);
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(view.is_background_ready());
        assert!(view.splash().is_loading());
        let (width, _) = view.particles().expect("field").size();
        assert_eq!(width, 1280.0 + 4.0 * PAN_AMOUNT);
    }

    #[test]
    fn waiting_for_the_background_delivers_the_field() {
        let mut view = mount(800);
        view.wait_for_background();
        assert!(view.is_background_ready());
        assert!(view.particles().is_some_and(|field| !field.particles().is_empty()));
        view.unmount();
    }

    #[test]
    fn crossing_a_breakpoint_switches_the_header() {
        use crate::viewport::HeaderStyle;

        let mut view = mount(1280);
        assert_eq!(view.layout().header, HeaderStyle::Full);
        view.update(FRAME_TIME, &idle(400), &MonoMeasure);
        assert_eq!(view.layout().header, HeaderStyle::Compact);
        assert!(view.geometry().width == 400.0);
    }

    #[test]
    fn layer_pans_with_the_carousel() {
        let mut view = mount(1280);
        assert_eq!(view.layer_origin().x, -150.0 + 112.5);
        run_until_ready(&mut view);
        let previous = view.geometry().previous;
        view.update(FRAME_TIME, &click(1280, previous), &MonoMeasure);
        for _ in 0..(FPS * 4) {
            view.update(FRAME_TIME, &idle(1280), &MonoMeasure);
        }
        assert_eq!(view.layer_origin().x, -150.0 - 112.5);
    }
}
