//! Step-by-step explorer: walks one nerve's waypoints over the reference illustration.

use std::rc::Rc;

use yew::Reducible;

use crate::atlas::StepLibrary;
use crate::model::{NerveStepProfile, Point, Step};

pub const DEFAULT_ZOOM: f64 = 2.5;
pub const ZOOM_RANGE: (f64, f64) = (1.0, 6.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepPhase {
    Past,
    Active,
    Future,
}

#[derive(Clone, Debug)]
pub struct TimelineEntry<'a> {
    pub index: usize,
    pub step: &'a Step,
    pub phase: StepPhase,
}

/// Scale + translate in percent of the illustration's own size, applied with
/// `transform-origin: 0 0`. Independent of the rendered pixel size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomTransform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl ZoomTransform {
    pub const IDENTITY: Self = Self { scale: 1.0, translate_x: 0.0, translate_y: 0.0 };

    /// Moves `focus` (percent coordinates) to the centre of the viewport at `scale`.
    pub fn centering(focus: Point, scale: f64) -> Self {
        Self {
            scale,
            translate_x: 50.0 - scale * focus.x,
            translate_y: 50.0 - scale * focus.y,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Where a percent coordinate ends up after the transform.
    pub fn apply(&self, p: Point) -> Point {
        Point::new(self.translate_x + self.scale * p.x, self.translate_y + self.scale * p.y)
    }

    pub fn to_css(&self) -> String {
        format!(
            "translate({:.3}%, {:.3}%) scale({:.3})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StepwiseAnimator {
    library: Rc<StepLibrary>,
    selected: Option<String>,
    current: usize,
    zoom_scale: f64,
}

impl StepwiseAnimator {
    pub fn new(library: Rc<StepLibrary>, zoom_scale: f64) -> Self {
        Self {
            library,
            selected: None,
            current: 0,
            zoom_scale: clamp_zoom(zoom_scale),
        }
    }

    /// Loads the nerve's profile and rewinds to the first step.
    pub fn select_nerve(&mut self, id: &str) -> bool {
        if self.library.profile(id).is_none() {
            log::warn!("explorer ignored: no step profile for `{id}`");
            return false;
        }
        self.selected = Some(id.to_string());
        self.current = 0;
        true
    }

    /// Teardown: nothing selected.
    pub fn reset(&mut self) {
        self.selected = None;
        self.current = 0;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn profile(&self) -> Option<&NerveStepProfile> {
        self.selected.as_deref().and_then(|id| self.library.profile(id))
    }

    pub fn library(&self) -> &StepLibrary {
        &self.library
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn step_count(&self) -> usize {
        self.profile().map_or(0, |p| p.steps.len())
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.profile().and_then(|p| p.steps.get(self.current))
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.step_count()
    }

    /// Next step; stays put on the last one.
    pub fn advance(&mut self) -> bool {
        self.go_to(self.current + 1)
    }

    /// Previous step; stays put on the first one.
    pub fn retreat(&mut self) -> bool {
        match self.current.checked_sub(1) {
            Some(k) => self.go_to(k),
            None => false,
        }
    }

    /// Jump to `k`, clamped to the profile. Returns whether the index moved.
    pub fn go_to(&mut self, k: usize) -> bool {
        let count = self.step_count();
        if count == 0 {
            return false;
        }
        let next = k.min(count - 1);
        let moved = next != self.current;
        self.current = next;
        moved
    }

    pub fn timeline(&self) -> Vec<TimelineEntry<'_>> {
        let Some(profile) = self.profile() else {
            return Vec::new();
        };
        profile
            .steps
            .iter()
            .enumerate()
            .map(|(index, step)| TimelineEntry {
                index,
                step,
                phase: match index.cmp(&self.current) {
                    std::cmp::Ordering::Less => StepPhase::Past,
                    std::cmp::Ordering::Equal => StepPhase::Active,
                    std::cmp::Ordering::Greater => StepPhase::Future,
                },
            })
            .collect()
    }

    /// Polyline through every coordinate-bearing step in `0..=k`.
    pub fn path_points(&self, k: usize) -> Vec<Point> {
        self.profile()
            .map(|p| p.steps.iter().take(k.saturating_add(1)).filter_map(|s| s.point).collect())
            .unwrap_or_default()
    }

    pub fn current_path(&self) -> Vec<Point> {
        self.path_points(self.current)
    }

    /// Zoom onto step `k` when it is an entrapment site, identity otherwise.
    pub fn zoom_transform(&self, k: usize) -> ZoomTransform {
        match self.profile().and_then(|p| p.steps.get(k)) {
            Some(Step { entrapment: true, point: Some(p), .. }) => ZoomTransform::centering(*p, self.zoom_scale),
            _ => ZoomTransform::IDENTITY,
        }
    }

    pub fn current_zoom(&self) -> ZoomTransform {
        self.zoom_transform(self.current)
    }

    pub fn set_zoom_scale(&mut self, scale: f64) {
        self.zoom_scale = clamp_zoom(scale);
    }
}

fn clamp_zoom(scale: f64) -> f64 {
    if scale.is_finite() {
        scale.clamp(ZOOM_RANGE.0, ZOOM_RANGE.1)
    } else {
        DEFAULT_ZOOM
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StepAction {
    SelectNerve(String),
    Advance,
    Retreat,
    GoTo(usize),
    SetZoom(f64),
    Reset,
}

impl Reducible for StepwiseAnimator {
    type Action = StepAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use StepAction::*;
        let mut new = (*self).clone();
        let changed = match action {
            SelectNerve(id) => new.select_nerve(&id),
            Advance => new.advance(),
            Retreat => new.retreat(),
            GoTo(k) => new.go_to(k),
            SetZoom(s) => {
                new.set_zoom_scale(s);
                true
            }
            Reset => {
                new.reset();
                true
            }
        };
        if changed { Rc::new(new) } else { self }
    }
}

/// Developer aid for authoring step data: converts a click on the rendered
/// illustration into a percent coordinate.
pub struct CoordinatePicker;

impl CoordinatePicker {
    pub fn pick(offset_x: f64, offset_y: f64, width: f64, height: f64) -> Option<Point> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        let x = offset_x / width * 100.0;
        let y = offset_y / height * 100.0;
        if !(0.0..=100.0).contains(&x) || !(0.0..=100.0).contains(&y) {
            return None;
        }
        Some(Point::new((x * 10.0).round() / 10.0, (y * 10.0).round() / 10.0))
    }

    /// `"point"` fragment ready to paste into `pathways.json`.
    pub fn snippet(p: Point) -> String {
        let value = serde_json::json!({ "point": { "x": p.x, "y": p.y } });
        value.to_string()
    }
}
