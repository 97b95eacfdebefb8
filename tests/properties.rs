mod support;

use dialnav::nav::TransitionPhase;
use dialnav::storage::{JsonSelectionStore, MemorySelectionStore, SelectionStore};
use dialnav::{NavigationRequest, NavigationRouter, PageIndex, PageLayout};
use support::{visible_after, Host, DIALER, FAVORITES, LOG};
use tempfile::TempDir;

#[test]
fn one_visibility_pair_per_net_page_change() {
    let settle_sequences: [&[usize]; 5] = [&[2], &[2, 2, 2], &[0, 2, 0, 2], &[2, 0], &[0, 1]];

    for settles in settle_sequences {
        let mut host = Host::new(Some(LOG as i64));
        host.swipe(settles);

        let last = *settles.last().unwrap_or(&LOG);
        let expected = if last == LOG {
            Vec::new()
        } else {
            vec![(LOG, false), (last, true)]
        };
        assert_eq!(host.visibility(), expected, "settles {settles:?}");
        assert_eq!(host.current(), last);
    }
}

#[test]
fn at_most_one_page_is_ever_visible() {
    let mut host = Host::new(None);

    host.swipe(&[1]);
    host.tap(2);
    host.router.on_scroll_phase_changed(TransitionPhase::Dragging);
    host.router.enter_search();
    host.router.exit_search();
    host.swipe(&[1, 0]);
    host.busy.set(true);
    host.router.apply_external_request(&NavigationRequest::Resume);

    let log = host.visibility();
    let mut visible = Some(DIALER);
    for (i, _) in log.iter().enumerate() {
        let now = visible_after(visible, &log[..=i]);
        assert!(now.len() <= 1, "{now:?} visible after {:?}", &log[..=i]);
    }
    visible = visible_after(visible, &log).first().copied();
    assert_eq!(visible, Some(host.current()));

    for pair in log.windows(2) {
        if pair[0].0 == pair[1].0 {
            assert_ne!(pair[0].1, pair[1].1, "duplicate callback in {log:?}");
        }
    }
}

#[test]
fn reselecting_current_tab_is_silent() {
    for start in [DIALER, LOG, FAVORITES] {
        let mut host = Host::new(Some(start as i64));
        let before = host.manual();

        let actions = host.tap(start);

        assert!(actions.is_empty());
        assert!(host.visibility().is_empty());
        assert_eq!(host.manual(), before);
    }
}

#[test]
fn busy_resolution_ignores_manual_selection() {
    let requests = [
        NavigationRequest::Resume,
        NavigationRequest::RecentActivity { call_key: false },
        NavigationRequest::FilterContacts { filter_text: None, from_history: false },
        NavigationRequest::OpenPage { page: 17 },
    ];

    for manual in [LOG, FAVORITES] {
        for request in &requests {
            let mut host = Host::new(Some(manual as i64));
            host.busy.set(true);

            assert_eq!(host.router.resolve(request), PageIndex::new(DIALER), "{request:?}");
            host.router.apply_external_request(request);
            assert_eq!(host.current(), DIALER);
            assert_eq!(host.manual(), manual);
        }
    }
}

#[test]
fn busy_taps_are_not_remembered() {
    let mut host = Host::new(Some(LOG as i64));
    host.busy.set(true);

    host.tap(FAVORITES);

    assert_eq!(host.current(), FAVORITES);
    assert_eq!(host.manual(), LOG);
}

#[test]
fn page_specific_links_win_over_busy() {
    let mut host = Host::new(Some(LOG as i64));
    host.busy.set(true);

    let request = NavigationRequest::OpenPage { page: FAVORITES };
    assert_eq!(host.router.resolve(&request), PageIndex::new(FAVORITES));
}

#[test]
fn search_mode_isolates_page_visibility() {
    let mut host = Host::new(Some(FAVORITES as i64));
    host.router.enter_search();
    host.clear();

    host.tap(LOG);
    host.swipe(&[0]);
    host.router.on_page_settled(DIALER);
    host.router.on_query_changed("x");
    host.router.enter_search();

    assert!(host.visibility().iter().all(|&(_, shown)| !shown));
    assert_eq!(host.router.visible_page(), None);

    host.router.exit_search();
    assert_eq!(host.visibility(), vec![(FAVORITES, true)]);
    assert_eq!(host.router.state().search_return_page(), None);
}

#[test]
fn search_entered_mid_swipe_returns_to_committed_page() {
    let mut host = Host::new(None);
    host.router.on_scroll_phase_changed(TransitionPhase::Dragging);

    host.router.enter_search();
    assert_eq!(host.router.state().phase(), TransitionPhase::Idle);

    host.router.exit_search();
    assert_eq!(
        host.visibility(),
        vec![(DIALER, false), (LOG, true), (LOG, false), (DIALER, true)]
    );
}

#[test]
fn selection_survives_a_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("selection.json");

    for page in [DIALER, LOG, FAVORITES] {
        let mut store = JsonSelectionStore::new(path.clone()).unwrap();
        let mut host = Host::new(None);
        host.tap(page);
        host.router.persist(&mut store).unwrap();

        let store = JsonSelectionStore::new(path.clone()).unwrap();
        let router = NavigationRouter::restore(PageLayout::dialer(), &store);
        assert_eq!(router.state().current_page(), PageIndex::new(page));
        assert_eq!(router.state().last_manual_selection(), PageIndex::new(page));
    }
}

#[test]
fn out_of_range_selection_restores_default_page() {
    for stored in [-1_i64, 3, 99, i64::MAX, i64::MIN] {
        let store = MemorySelectionStore::with_selection(stored);
        let router = NavigationRouter::restore(PageLayout::dialer(), &store);
        assert_eq!(router.state().current_page(), PageIndex::new(DIALER), "stored {stored}");
    }
}

#[test]
fn unreadable_store_restores_default_page() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("selection.json");
    std::fs::write(&path, "not json").unwrap();

    let store = JsonSelectionStore::new(path).unwrap();
    assert!(store.load_selection().is_err());

    let router = NavigationRouter::restore(PageLayout::dialer(), &store);
    assert_eq!(router.state().current_page(), PageIndex::new(DIALER));
}

#[test]
fn busy_swipes_are_not_remembered() {
    let mut host = Host::new(Some(LOG as i64));
    host.busy.set(true);

    host.swipe(&[FAVORITES]);

    assert_eq!(host.current(), FAVORITES);
    assert_eq!(host.manual(), LOG);
    assert!(host.router.state().busy());
}

#[test]
fn swipes_after_the_call_ends_are_remembered_again() {
    let mut host = Host::new(Some(LOG as i64));
    host.busy.set(true);
    host.swipe(&[FAVORITES]);

    host.busy.set(false);
    host.swipe(&[DIALER]);

    assert_eq!(host.manual(), DIALER);
    assert!(!host.router.state().busy());
}

#[test]
fn drag_interrupting_a_tap_is_remembered_where_it_lands() {
    let mut host = Host::new(Some(LOG as i64));

    host.router.on_tab_tapped(FAVORITES);
    host.router.on_scroll_phase_changed(TransitionPhase::Settling);
    assert_eq!(host.manual(), FAVORITES);

    host.router.on_scroll_phase_changed(TransitionPhase::Dragging);
    host.router.on_page_settled(DIALER);
    host.router.on_scroll_phase_changed(TransitionPhase::Idle);

    assert_eq!(host.current(), DIALER);
    assert_eq!(host.manual(), DIALER);
    assert_eq!(host.visibility(), vec![(LOG, false), (DIALER, true)]);
}
