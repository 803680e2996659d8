//! End-to-end tour walk: load a JSON definition, start the session, step
//! through every stop and back, then end.

use std::collections::{BTreeMap, HashMap};

use serde_json::json;
use waymark_core::geometry::{RectPx, Size, Viewport};
use waymark_core::model::{StepContent, WelcomeContent};
use waymark_overlay::mask::MaskGeometry;
use waymark_overlay::placement::{Placement, Side};
use waymark_runtime::loader::{StaticSource, load_definition};
use waymark_runtime::scroll::SETTLE_DELAY;
use waymark_runtime::session::{ControlState, HostPage, TourEvent, TourSession};
use web_time::Instant;

/// Minimal host page: fixed element rectangles, scrolling shifts them all.
struct FakePage {
    rects: HashMap<String, RectPx>,
    placements: Vec<(String, Side)>,
    overlay_inserted: bool,
    overlay_removed: bool,
    scroll_locked: bool,
    scrolls: Vec<f64>,
    controls: Option<ControlState>,
}

impl FakePage {
    fn new(rects: &[(&str, RectPx)]) -> Self {
        Self {
            rects: rects
                .iter()
                .map(|(id, rect)| (id.to_string(), *rect))
                .collect(),
            placements: Vec::new(),
            overlay_inserted: false,
            overlay_removed: false,
            scroll_locked: false,
            scrolls: Vec::new(),
            controls: None,
        }
    }
}

impl HostPage for FakePage {
    fn measure(&self, element_id: &str) -> Option<RectPx> {
        self.rects.get(element_id).copied()
    }
    fn viewport(&self) -> Viewport {
        Viewport::new(1200.0, 800.0)
    }
    fn panel_size(&self) -> Size {
        Size::new(300.0, 150.0)
    }
    fn insert_overlay(&mut self) {
        self.overlay_inserted = true;
    }
    fn remove_overlay(&mut self) {
        self.overlay_removed = true;
    }
    fn apply_mask(&mut self, _mask: &MaskGeometry) {}
    fn set_mask_color(&mut self, _color: &str) {}
    fn apply_panel(&mut self, placement: &Placement, content: &StepContent) {
        self.placements.push((content.title.clone(), placement.side));
    }
    fn apply_controls(&mut self, controls: ControlState) {
        self.controls = Some(controls);
    }
    fn set_theme_variables(&mut self, _theme: &BTreeMap<String, String>) {}
    fn scroll_by(&mut self, offset: f64) {
        self.scrolls.push(offset);
        for rect in self.rects.values_mut() {
            *rect = RectPx::from_bounds(rect.top - offset, rect.left, rect.width, rect.height);
        }
    }
    fn set_scroll_lock(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }
    fn show_welcome(&mut self, _content: &WelcomeContent) {}
    fn close_welcome(&mut self) {}
}

fn element(id: &str, order: i64) -> serde_json::Value {
    json!({
        "id": id,
        "order": order,
        "maskColor": "rgba(0,0,0,0.6)",
        "content": { "title": format!("{id} title"), "description": "..." }
    })
}

fn document() -> String {
    // Orders are shuffled on purpose; the loader sorts them.
    json!({
        "displayStatus": true,
        "theme": { "theme": "#1f6feb" },
        "welcomeModalContent": { "title": "Welcome", "body": "Take the tour" },
        "elements": [element("footer", 3), element("header", 1), element("search", 2)]
    })
    .to_string()
}

fn settle(session: &mut TourSession<FakePage>, from: Instant) -> Instant {
    // One poll tick, then one past the settle deadline.
    session.handle(TourEvent::Tick, from);
    let done = from + SETTLE_DELAY;
    session.handle(TourEvent::Tick, done);
    done
}

#[test]
fn full_walk_forward_and_back() {
    let definition = load_definition(&StaticSource(document())).unwrap();
    let page = FakePage::new(&[
        // header near the top-left: panel goes right
        ("header", RectPx::from_bounds(50.0, 50.0, 200.0, 60.0)),
        // search near the right edge: panel goes left
        ("search", RectPx::from_bounds(300.0, 1000.0, 150.0, 40.0)),
        // footer below the fold: scrolled to, then panel right
        ("footer", RectPx::from_bounds(1900.0, 100.0, 300.0, 80.0)),
    ]);
    let mut session = TourSession::new(definition, page).unwrap();

    let t0 = Instant::now();
    session.open();
    assert!(session.host().scroll_locked);

    session.handle(TourEvent::StartRequested, t0);
    assert!(session.host().overlay_inserted);
    let t1 = settle(&mut session, t0);

    // Sorted by order: header is first despite input order.
    assert_eq!(session.host().placements[0].0, "header title");
    assert_eq!(session.host().placements[0].1, Side::Right);
    assert_eq!(session.host().scrolls, Vec::<f64>::new());

    session.handle(TourEvent::NextRequested, t1);
    let t2 = settle(&mut session, t1);
    assert_eq!(session.host().placements[1].0, "search title");
    assert_eq!(session.host().placements[1].1, Side::Left);

    // Footer is off-screen: exactly one scroll, anchored 100px from the top.
    session.handle(TourEvent::NextRequested, t2);
    assert_eq!(session.host().scrolls, vec![1800.0]);
    let t3 = settle(&mut session, t2);
    assert_eq!(session.host().placements[2].0, "footer title");
    assert_eq!(
        session.host().controls,
        Some(ControlState {
            prev_enabled: false,
            next_enabled: false,
            end_visible: true,
        })
    );

    // Walk one step back: the page is still scrolled down, so the search
    // element needs one upward scroll (top -1500, anchored at 100).
    session.handle(TourEvent::PrevRequested, t3);
    let _t4 = settle(&mut session, t3);
    assert_eq!(session.host().placements[3].0, "search title");
    assert_eq!(session.host().scrolls, vec![1800.0, -1600.0]);

    session.handle(TourEvent::EndRequested, _t4);
    assert!(session.host().overlay_removed);
    assert!(!session.host().scroll_locked);
}
