#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Helpers
// =============================================================

fn hrefs(items: &[&str]) -> Vec<Option<String>> {
    items.iter().map(|h| Some((*h).to_owned())).collect()
}

fn core_with(caps: Capabilities) -> NavCore {
    NavCore::new(NavConfig::default(), caps, hrefs(&["#a", "#b", "#c", "https://example.com/blog"]))
}

fn core() -> NavCore {
    core_with(Capabilities::default())
}

fn page() -> Vec<SectionBounds> {
    vec![
        SectionBounds::new("a", 0.0, 300.0),
        SectionBounds::new("b", 300.0, 400.0),
        SectionBounds::new("c", 700.0, 500.0),
    ]
}

fn at(top: f64, header_height: f64) -> impl FnOnce(&str) -> Option<SectionTarget> {
    move |_: &str| Some(SectionTarget { top, header_height })
}

fn nowhere(_: &str) -> Option<SectionTarget> {
    None
}

fn key(name: &str) -> KeyPress {
    KeyPress::from_browser(name, false)
}

fn shift_tab() -> KeyPress {
    KeyPress::from_browser("Tab", true)
}

fn open(core: &mut NavCore) {
    core.toggle();
    assert!(core.is_open());
}

// =============================================================
// Construction
// =============================================================

#[test]
fn starts_closed_with_nothing_active() {
    let core = core();
    assert_eq!(core.menu(), MenuState::Closed);
    assert_eq!(core.active_link(), None);
    assert_eq!(core.link_count(), 4);
}

#[test]
fn exposes_config() {
    let core = core();
    assert_eq!(core.config().breakpoint_px, 768.0);
}

#[test]
fn internal_target_strips_hash() {
    let core = core();
    assert_eq!(core.internal_target(1), Some("b"));
    assert_eq!(core.internal_target(3), None);
    assert_eq!(core.internal_target(99), None);
}

#[test]
fn link_without_href_is_not_internal() {
    let core = NavCore::new(NavConfig::default(), Capabilities::default(), vec![None]);
    assert_eq!(core.internal_target(0), None);
}

// =============================================================
// Toggle
// =============================================================

#[test]
fn toggle_opens_then_closes() {
    let mut core = core();
    assert_eq!(core.toggle(), vec![Effect::ShowMenu]);
    assert!(core.is_open());
    assert_eq!(core.toggle(), vec![Effect::HideMenu]);
    assert!(!core.is_open());
}

#[test]
fn open_flag_tracks_toggle_parity() {
    let mut core = core();
    for n in 1..=9 {
        core.toggle();
        assert_eq!(core.is_open(), n % 2 == 1, "after {n} toggles");
    }
}

#[test]
fn enter_and_space_on_toggle_prevent_default_and_toggle() {
    let mut core = core();
    assert_eq!(core.on_toggle_key(key("Enter")), vec![Effect::PreventDefault, Effect::ShowMenu]);
    assert_eq!(core.on_toggle_key(key(" ")), vec![Effect::PreventDefault, Effect::HideMenu]);
}

#[test]
fn keyboard_toggle_matches_click_toggle() {
    let mut by_click = core();
    let mut by_key = core();
    for _ in 0..3 {
        by_click.toggle();
        by_key.on_toggle_key(key("Enter"));
        assert_eq!(by_click.menu(), by_key.menu());
    }
}

#[test]
fn other_keys_on_toggle_do_nothing() {
    let mut core = core();
    assert!(core.on_toggle_key(key("a")).is_empty());
    assert!(core.on_toggle_key(key("Escape")).is_empty());
    assert!(!core.is_open());
}

// =============================================================
// Close
// =============================================================

#[test]
fn close_is_idempotent() {
    let mut core = core();
    assert_eq!(core.close(), vec![Effect::HideMenu]);
    assert_eq!(core.close(), vec![Effect::HideMenu]);
    assert_eq!(core.menu(), MenuState::Closed);
    assert_eq!(core.active_link(), None);
}

#[test]
fn close_from_open() {
    let mut core = core();
    open(&mut core);
    core.close();
    assert!(!core.is_open());
}

#[test]
fn outside_click_closes_open_menu() {
    let mut core = core();
    open(&mut core);
    assert_eq!(core.on_document_click(false), vec![Effect::HideMenu]);
    assert!(!core.is_open());
}

#[test]
fn inside_click_keeps_menu_open() {
    let mut core = core();
    open(&mut core);
    assert!(core.on_document_click(true).is_empty());
    assert!(core.is_open());
}

#[test]
fn outside_click_when_closed_is_noop() {
    let mut core = core();
    assert!(core.on_document_click(false).is_empty());
}

#[test]
fn escape_closes_open_menu() {
    let mut core = core();
    open(&mut core);
    assert_eq!(core.on_key(key("Escape"), None), vec![Effect::HideMenu]);
    assert!(!core.is_open());
}

#[test]
fn escape_when_closed_is_noop() {
    let mut core = core();
    assert!(core.on_key(key("Escape"), None).is_empty());
}

#[test]
fn wide_resize_closes_open_menu() {
    let mut core = core();
    open(&mut core);
    assert_eq!(core.on_resize(1024.0), vec![Effect::HideMenu]);
    assert!(!core.is_open());
}

#[test]
fn narrow_resize_keeps_menu_open() {
    let mut core = core();
    open(&mut core);
    assert!(core.on_resize(600.0).is_empty());
    assert!(core.on_resize(768.0).is_empty());
    assert!(core.is_open());
}

#[test]
fn resize_when_closed_is_noop() {
    let mut core = core();
    assert!(core.on_resize(1920.0).is_empty());
    assert!(!core.is_open());
}

#[test]
fn configured_breakpoint_applies() {
    let config = NavConfig { breakpoint_px: 1024.0, ..NavConfig::default() };
    let mut core = NavCore::new(config, Capabilities::default(), Vec::new());
    open(&mut core);
    assert!(core.on_resize(900.0).is_empty());
    assert_eq!(core.on_resize(1025.0), vec![Effect::HideMenu]);
}

// =============================================================
// Link clicks
// =============================================================

#[test]
fn internal_link_scrolls_below_header_and_activates() {
    let mut core = core();
    open(&mut core);
    let effects = core.on_link_click(1, at(300.0, 80.0));
    assert_eq!(
        effects,
        vec![
            Effect::PreventDefault,
            Effect::HideMenu,
            Effect::ScrollTo { top: 220.0 },
            Effect::SetActiveLink(Some(1)),
        ]
    );
    assert!(!core.is_open());
    assert_eq!(core.active_link(), Some(1));
}

#[test]
fn internal_link_closes_even_when_menu_closed() {
    let mut core = core();
    let effects = core.on_link_click(0, at(0.0, 0.0));
    assert!(effects.contains(&Effect::HideMenu));
}

#[test]
fn internal_link_without_smooth_scroll_animates() {
    let mut core = core_with(Capabilities { smooth_scroll: false, intersection_observer: false });
    let effects = core.on_link_click(2, at(700.0, 100.0));
    assert!(effects.contains(&Effect::AnimateScroll { to: 600.0, duration_ms: 800.0 }));
    assert!(!effects.iter().any(|e| matches!(e, Effect::ScrollTo { .. })));
}

#[test]
fn missing_target_closes_without_scrolling() {
    let mut core = core();
    core.on_link_click(0, at(0.0, 0.0));
    let effects = core.on_link_click(1, nowhere);
    assert_eq!(effects, vec![Effect::PreventDefault, Effect::HideMenu]);
    assert_eq!(core.active_link(), Some(0), "active link is unchanged");
}

#[test]
fn external_link_is_left_to_browser() {
    let mut core = core();
    open(&mut core);
    let effects = core.on_link_click(3, |_| panic!("external links are never located"));
    assert!(effects.is_empty());
    assert!(core.is_open());
}

#[test]
fn locate_receives_fragment_id() {
    let mut core = core();
    let mut seen = None;
    core.on_link_click(2, |id| {
        seen = Some(id.to_owned());
        None
    });
    assert_eq!(seen.as_deref(), Some("c"));
}

#[test]
fn clicked_link_is_the_only_active_one() {
    let mut core = core();
    for index in [2, 0, 1] {
        let effects = core.on_link_click(index, at(100.0, 10.0));
        let active: Vec<_> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::SetActiveLink(i) => Some(*i),
                _ => None,
            })
            .collect();
        assert_eq!(active, vec![Some(index)]);
        assert_eq!(core.active_link(), Some(index));
    }
}

// =============================================================
// Scroll
// =============================================================

#[test]
fn scroll_250_activates_b() {
    let mut core = core();
    let effects = core.on_scroll(250.0, &page());
    assert_eq!(effects[0], Effect::SetActiveLink(Some(1)));
    assert_eq!(core.active_link(), Some(1));
}

#[test]
fn scroll_applies_active_link_before_shadow() {
    let mut core = core();
    let effects = core.on_scroll(60.0, &page());
    assert!(matches!(effects[0], Effect::SetActiveLink(_)));
    assert_eq!(effects[1], Effect::SetHeaderShadow(HeaderShadow::Scrolled));
    assert_eq!(effects.len(), 2);
}

#[test]
fn shadow_follows_threshold() {
    let mut core = core();
    let resting = core.on_scroll(40.0, &page());
    assert_eq!(resting.last(), Some(&Effect::SetHeaderShadow(HeaderShadow::Resting)));
    let scrolled = core.on_scroll(60.0, &page());
    assert_eq!(scrolled.last(), Some(&Effect::SetHeaderShadow(HeaderShadow::Scrolled)));
}

#[test]
fn scroll_past_all_sections_clears_active() {
    let mut core = core();
    core.on_link_click(0, at(0.0, 0.0));
    let effects = core.on_scroll(5000.0, &page());
    assert_eq!(effects[0], Effect::SetActiveLink(None));
    assert_eq!(core.active_link(), None);
}

#[test]
fn scroll_overrides_clicked_link() {
    let mut core = core();
    core.on_link_click(2, at(700.0, 0.0));
    core.on_scroll(0.0, &page());
    assert_eq!(core.active_link(), Some(0));
}

#[test]
fn section_without_link_clears_active() {
    let mut core = NavCore::new(NavConfig::default(), Capabilities::default(), hrefs(&["#a"]));
    core.on_scroll(0.0, &page());
    assert_eq!(core.active_link(), Some(0));
    core.on_scroll(250.0, &page());
    assert_eq!(core.active_link(), None);
}

#[test]
fn sync_active_leaves_shadow_alone() {
    let mut core = core();
    let effects = core.sync_active(900.0, &page());
    assert_eq!(effects, vec![Effect::SetActiveLink(Some(2))]);
}

#[test]
fn at_most_one_link_active_for_any_scroll() {
    let mut core = core();
    let mut y = 0.0;
    while y < 1500.0 {
        let effects = core.on_scroll(y, &page());
        let count = effects.iter().filter(|e| matches!(e, Effect::SetActiveLink(_))).count();
        assert_eq!(count, 1, "scroll {y}");
        y += 37.0;
    }
}

#[test]
fn scroll_does_not_touch_menu() {
    let mut core = core();
    open(&mut core);
    core.on_scroll(500.0, &page());
    assert!(core.is_open());
}

// =============================================================
// Focus trap
// =============================================================

#[test]
fn tab_on_last_item_wraps_to_first() {
    let mut core = core();
    open(&mut core);
    let snapshot = FocusSnapshot { count: 3, current: Some(2) };
    assert_eq!(core.on_key(key("Tab"), Some(snapshot)), vec![Effect::FocusMenuItem(0), Effect::PreventDefault]);
}

#[test]
fn shift_tab_on_first_item_wraps_to_last() {
    let mut core = core();
    open(&mut core);
    let snapshot = FocusSnapshot { count: 3, current: Some(0) };
    assert_eq!(core.on_key(shift_tab(), Some(snapshot)), vec![Effect::FocusMenuItem(2), Effect::PreventDefault]);
}

#[test]
fn tab_in_middle_is_not_intercepted() {
    let mut core = core();
    open(&mut core);
    let snapshot = FocusSnapshot { count: 3, current: Some(1) };
    assert!(core.on_key(key("Tab"), Some(snapshot)).is_empty());
}

#[test]
fn tab_is_not_trapped_when_closed() {
    let mut core = core();
    assert!(!core.traps(key("Tab")));
    let snapshot = FocusSnapshot { count: 3, current: Some(2) };
    assert!(core.on_key(key("Tab"), Some(snapshot)).is_empty());
}

#[test]
fn traps_only_tab_while_open() {
    let mut core = core();
    open(&mut core);
    assert!(core.traps(key("Tab")));
    assert!(core.traps(shift_tab()));
    assert!(!core.traps(key("Enter")));
}

#[test]
fn tab_without_snapshot_does_nothing() {
    let mut core = core();
    open(&mut core);
    assert!(core.on_key(key("Tab"), None).is_empty());
}

#[test]
fn empty_menu_never_traps() {
    let mut core = core();
    open(&mut core);
    let snapshot = FocusSnapshot { count: 0, current: None };
    assert!(core.on_key(key("Tab"), Some(snapshot)).is_empty());
}

// =============================================================
// Scenario
// =============================================================

#[test]
fn click_toggle_twice_round_trips() {
    let mut core = core();
    assert_eq!(core.toggle(), vec![Effect::ShowMenu]);
    assert!(core.is_open());
    assert_eq!(core.toggle(), vec![Effect::HideMenu]);
    assert!(!core.is_open());
}

#[test]
fn mobile_session() {
    let mut core = core();
    core.sync_active(0.0, &page());
    assert_eq!(core.active_link(), Some(0));

    open(&mut core);
    core.on_link_click(2, at(700.0, 80.0));
    assert!(!core.is_open());
    assert_eq!(core.active_link(), Some(2));

    open(&mut core);
    core.on_key(key("Escape"), None);
    assert!(!core.is_open());

    open(&mut core);
    core.on_resize(1280.0);
    assert!(!core.is_open());
}
