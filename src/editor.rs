use crate::model::{GeoPoint, planar_distance};

/// Distance in degrees under which a click counts as hitting the first
/// vertex and closes the ring. Fixed, independent of the current zoom.
pub const CLOSE_THRESHOLD: f64 = 0.03;

#[derive(Clone, Debug, PartialEq)]
pub enum Mode {
    Idle,
    Drawing,
    Selected(String),
}

/// What a primary click did while draw mode was active.
#[derive(Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    /// Click was ignored (draw mode not active; the host routes it).
    Ignored,
    /// The point was appended to the pending vertices.
    Added,
    /// The click closed the polygon; the closed ring (pending vertices plus
    /// a duplicate of the first) is handed to the caller to persist.
    Closed(Vec<GeoPoint>),
}

/// Drawing and selection state machine.
///
/// Owns the transient drawing session (pending vertices and hover point);
/// persisted areas are referenced by id only, never held here.
pub struct Editor {
    mode: Mode,
    pending: Vec<GeoPoint>,
    hover: Option<GeoPoint>,
}

impl Default for Editor {
    fn default() -> Self {
        Self {
            mode: Mode::Idle,
            pending: Vec::new(),
            hover: None,
        }
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_drawing(&self) -> bool {
        self.mode == Mode::Drawing
    }

    pub fn selected_id(&self) -> Option<&str> {
        match &self.mode {
            Mode::Selected(id) => Some(id),
            _ => None,
        }
    }

    pub fn pending_points(&self) -> &[GeoPoint] {
        &self.pending
    }

    pub fn hover_point(&self) -> Option<GeoPoint> {
        self.hover
    }

    /// True while the cursor is near enough to the first vertex that the
    /// next click would close the polygon.
    pub fn will_close(&self) -> bool {
        match self.hover {
            Some(h) => self.near_first_vertex(h),
            None => false,
        }
    }

    fn near_first_vertex(&self, p: GeoPoint) -> bool {
        self.pending.len() > 2 && planar_distance(p, self.pending[0]) < CLOSE_THRESHOLD
    }

    /// Toggle draw mode. Entering clears any selection and starts an empty
    /// session; leaving discards the session without creating an area.
    pub fn toggle_draw(&mut self) {
        if self.is_drawing() {
            self.mode = Mode::Idle;
        } else {
            self.mode = Mode::Drawing;
        }
        self.pending.clear();
        self.hover = None;
    }

    /// Primary click at `p` while drawing: closes the polygon when near the
    /// first vertex with enough points placed, otherwise adds a vertex.
    pub fn primary_click(&mut self, p: GeoPoint) -> ClickOutcome {
        if !self.is_drawing() {
            return ClickOutcome::Ignored;
        }
        if self.near_first_vertex(p) {
            let mut ring = std::mem::take(&mut self.pending);
            ring.push(ring[0]);
            self.hover = None;
            self.mode = Mode::Idle;
            ClickOutcome::Closed(ring)
        } else {
            self.pending.push(p);
            ClickOutcome::Added
        }
    }

    /// Secondary action while drawing: undo the last vertex, or leave draw
    /// mode when there is nothing left to undo.
    pub fn secondary_click(&mut self) {
        if !self.is_drawing() {
            return;
        }
        if self.pending.pop().is_none() {
            self.mode = Mode::Idle;
            self.hover = None;
        }
    }

    pub fn pointer_move(&mut self, p: GeoPoint) {
        if self.is_drawing() {
            self.hover = Some(p);
        }
    }

    /// Select a rendered area. Unreachable while drawing; the host only
    /// routes area clicks here when draw mode is off.
    pub fn select(&mut self, id: String) {
        if !self.is_drawing() {
            self.mode = Mode::Selected(id);
        }
    }

    pub fn cancel_selection(&mut self) {
        if matches!(self.mode, Mode::Selected(_)) {
            self.mode = Mode::Idle;
        }
    }

    /// Drop the selection when the selected area was deleted.
    pub fn area_deleted(&mut self, id: &str) {
        if self.selected_id() == Some(id) {
            self.mode = Mode::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CLOSE_THRESHOLD, ClickOutcome, Editor, Mode};
    use crate::model::GeoPoint;

    #[test]
    fn close_click_emits_ring_and_returns_to_idle() {
        let mut editor = Editor::new();
        editor.toggle_draw();
        assert_eq!(editor.primary_click(GeoPoint::new(10.0, 10.0)), ClickOutcome::Added);
        assert_eq!(editor.primary_click(GeoPoint::new(10.0, 11.0)), ClickOutcome::Added);
        assert_eq!(editor.primary_click(GeoPoint::new(10.0, 12.0)), ClickOutcome::Added);

        let outcome = editor.primary_click(GeoPoint::new(10.0, 10.0001));
        let ClickOutcome::Closed(ring) = outcome else {
            panic!("expected close, got {outcome:?}");
        };
        assert_eq!(
            ring,
            vec![
                GeoPoint::new(10.0, 10.0),
                GeoPoint::new(10.0, 11.0),
                GeoPoint::new(10.0, 12.0),
                GeoPoint::new(10.0, 10.0),
            ]
        );
        assert_eq!(*editor.mode(), Mode::Idle);
        assert!(editor.pending_points().is_empty());
    }

    #[test]
    fn near_click_with_too_few_points_adds_a_vertex() {
        let mut editor = Editor::new();
        editor.toggle_draw();
        editor.primary_click(GeoPoint::new(0.0, 0.0));
        editor.primary_click(GeoPoint::new(0.0, 0.01));
        // two vertices placed: the proximity rule does not apply yet
        assert_eq!(editor.primary_click(GeoPoint::new(0.0, 0.0001)), ClickOutcome::Added);
        assert_eq!(editor.pending_points().len(), 3);
        assert!(editor.is_drawing());
    }

    #[test]
    fn far_click_keeps_adding_vertices() {
        let mut editor = Editor::new();
        editor.toggle_draw();
        for i in 0..5 {
            let p = GeoPoint::new(10.0 + i as f64, 10.0);
            assert_eq!(editor.primary_click(p), ClickOutcome::Added);
        }
        assert_eq!(editor.pending_points().len(), 5);
        assert!(editor.is_drawing());
    }

    #[test]
    fn secondary_pops_last_then_exits() {
        let mut editor = Editor::new();
        editor.toggle_draw();
        editor.primary_click(GeoPoint::new(0.0, 0.0));
        editor.primary_click(GeoPoint::new(0.0, 1.0));

        editor.secondary_click();
        assert_eq!(editor.pending_points(), &[GeoPoint::new(0.0, 0.0)]);
        assert!(editor.is_drawing());

        editor.secondary_click();
        assert!(editor.pending_points().is_empty());
        assert!(editor.is_drawing());

        editor.secondary_click();
        assert_eq!(*editor.mode(), Mode::Idle);
    }

    #[test]
    fn toggle_off_discards_session() {
        let mut editor = Editor::new();
        editor.toggle_draw();
        editor.primary_click(GeoPoint::new(1.0, 1.0));
        editor.primary_click(GeoPoint::new(2.0, 2.0));
        editor.toggle_draw();
        assert_eq!(*editor.mode(), Mode::Idle);
        assert!(editor.pending_points().is_empty());

        // re-entering starts from an empty session
        editor.toggle_draw();
        assert!(editor.pending_points().is_empty());
    }

    #[test]
    fn entering_draw_mode_clears_selection() {
        let mut editor = Editor::new();
        editor.select("a1".to_string());
        assert_eq!(editor.selected_id(), Some("a1"));
        editor.toggle_draw();
        assert_eq!(*editor.mode(), Mode::Drawing);
        assert_eq!(editor.selected_id(), None);
    }

    #[test]
    fn selection_is_unreachable_while_drawing() {
        let mut editor = Editor::new();
        editor.toggle_draw();
        editor.select("a1".to_string());
        assert!(editor.is_drawing());
        assert_eq!(editor.selected_id(), None);
    }

    #[test]
    fn selection_cancel_and_deletion() {
        let mut editor = Editor::new();
        editor.select("a1".to_string());
        editor.area_deleted("other");
        assert_eq!(editor.selected_id(), Some("a1"));
        editor.area_deleted("a1");
        assert_eq!(*editor.mode(), Mode::Idle);

        editor.select("a2".to_string());
        editor.cancel_selection();
        assert_eq!(*editor.mode(), Mode::Idle);
    }

    #[test]
    fn will_close_follows_hover() {
        let mut editor = Editor::new();
        editor.toggle_draw();
        editor.primary_click(GeoPoint::new(10.0, 10.0));
        editor.primary_click(GeoPoint::new(10.0, 11.0));
        editor.primary_click(GeoPoint::new(10.0, 12.0));

        editor.pointer_move(GeoPoint::new(10.0, 10.0 + CLOSE_THRESHOLD * 0.5));
        assert!(editor.will_close());

        editor.pointer_move(GeoPoint::new(10.0, 10.0 + CLOSE_THRESHOLD * 2.0));
        assert!(!editor.will_close());
        assert_eq!(
            editor.hover_point(),
            Some(GeoPoint::new(10.0, 10.0 + CLOSE_THRESHOLD * 2.0))
        );
    }

    #[test]
    fn hover_is_ignored_outside_draw_mode() {
        let mut editor = Editor::new();
        editor.pointer_move(GeoPoint::new(1.0, 1.0));
        assert_eq!(editor.hover_point(), None);
        assert!(!editor.will_close());
    }
}
