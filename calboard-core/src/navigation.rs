//! Toolbar navigation against the rendering engine.
//!
//! The engine is the source of truth for the focused date and view. After
//! every command the controller reads the result back into `ViewState`.
//! Without a mounted engine every command is a no-op.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::engine::RenderingEngine;
use crate::view::{ViewMode, ViewState};

#[derive(Debug)]
pub struct NavigationController<E> {
    engine: Option<E>,
    state: ViewState,
    is_wide: bool,
}

impl<E: RenderingEngine> NavigationController<E> {
    /// A controller with no engine yet, starting from the width default view.
    pub fn new(date: DateTime<Utc>, is_wide: bool) -> Self {
        NavigationController {
            engine: None,
            state: ViewState::new(date, is_wide),
            is_wide,
        }
    }

    /// Attach the engine and bring it in line with the current view.
    pub fn mount(&mut self, mut engine: E) {
        engine.set_view(self.state.view);
        self.state.date = engine.focused_date();
        self.engine = Some(engine);
    }

    /// Detach the engine, returning it to the caller.
    pub fn unmount(&mut self) -> Option<E> {
        self.engine.take()
    }

    pub fn is_mounted(&self) -> bool {
        self.engine.is_some()
    }

    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.engine.as_mut()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_wide(&self) -> bool {
        self.is_wide
    }

    pub fn go_to_today(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.focus_today();
            self.state.date = engine.focused_date();
        }
    }

    pub fn change_view(&mut self, mode: ViewMode) {
        if let Some(engine) = self.engine.as_mut() {
            engine.set_view(mode);
            self.state.view = mode;
        }
    }

    pub fn go_to_previous(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.step_previous();
            self.state.date = engine.focused_date();
        }
    }

    pub fn go_to_next(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.step_next();
            self.state.date = engine.focused_date();
        }
    }

    /// The display crossed the responsive breakpoint.
    ///
    /// Forces the width default view even over a view the user picked.
    /// Before mount only the state changes; `mount` pushes it to the engine.
    pub fn on_breakpoint_change(&mut self, is_wide: bool) {
        if self.is_wide == is_wide {
            return;
        }
        self.is_wide = is_wide;

        let mode = ViewMode::for_width(is_wide);
        debug!(is_wide, view = %mode, mounted = self.is_mounted(), "Breakpoint changed");
        self.state.view = mode;
        self.change_view(mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    /// Records every command it receives.
    #[derive(Debug, Default)]
    struct FakeEngine {
        date: Option<DateTime<Utc>>,
        view: Option<ViewMode>,
        calls: Vec<&'static str>,
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 20, 0, 0, 0).unwrap()
    }

    impl RenderingEngine for FakeEngine {
        fn focus_today(&mut self) {
            self.calls.push("today");
            self.date = Some(start() + Duration::days(100));
        }

        fn step_previous(&mut self) {
            self.calls.push("prev");
            self.date = Some(self.focused_date() - Duration::days(1));
        }

        fn step_next(&mut self) {
            self.calls.push("next");
            self.date = Some(self.focused_date() + Duration::days(1));
        }

        fn set_view(&mut self, mode: ViewMode) {
            self.calls.push("set_view");
            self.view = Some(mode);
        }

        fn focused_date(&self) -> DateTime<Utc> {
            self.date.unwrap_or_else(start)
        }

        fn view(&self) -> ViewMode {
            self.view.unwrap_or(ViewMode::DayGridMonth)
        }

        fn unselect(&mut self) {
            self.calls.push("unselect");
        }

        fn visible_range(&self) -> (DateTime<Utc>, DateTime<Utc>) {
            (self.focused_date(), self.focused_date() + Duration::days(1))
        }
    }

    fn mounted(is_wide: bool) -> NavigationController<FakeEngine> {
        let mut controller = NavigationController::new(start(), is_wide);
        controller.mount(FakeEngine::default());
        controller
    }

    fn assert_mirrors_engine(controller: &NavigationController<FakeEngine>) {
        let engine = controller.engine().unwrap();
        assert_eq!(controller.state().date, engine.focused_date());
        assert_eq!(controller.state().view, engine.view());
    }

    #[test]
    fn test_mount_pushes_initial_view() {
        let controller = mounted(false);
        assert_eq!(controller.engine().unwrap().view, Some(ViewMode::ListWeek));
        assert_mirrors_engine(&controller);
    }

    #[test]
    fn test_next_and_previous_read_back_date() {
        let mut controller = mounted(true);
        controller.go_to_next();
        controller.go_to_next();
        assert_eq!(controller.state().date, start() + Duration::days(2));
        controller.go_to_previous();
        assert_eq!(controller.state().date, start() + Duration::days(1));
        assert_mirrors_engine(&controller);
    }

    #[test]
    fn test_today_reads_back_engine_date() {
        let mut controller = mounted(true);
        controller.go_to_today();
        assert_eq!(controller.state().date, start() + Duration::days(100));
    }

    #[test]
    fn test_change_view_is_unconditional() {
        for initial in [true, false] {
            let mut controller = mounted(initial);
            controller.change_view("listWeek".parse().unwrap());
            assert_eq!(controller.state().view, ViewMode::ListWeek);
            assert_mirrors_engine(&controller);
        }
    }

    #[test]
    fn test_commands_without_engine_are_noops() {
        let mut controller: NavigationController<FakeEngine> =
            NavigationController::new(start(), true);
        let before = *controller.state();

        controller.go_to_next();
        controller.go_to_previous();
        controller.go_to_today();
        controller.change_view(ViewMode::TimeGridDay);

        assert_eq!(*controller.state(), before);
    }

    #[test]
    fn test_breakpoint_flip_overrides_user_view() {
        let mut controller = mounted(true);
        controller.change_view(ViewMode::TimelineWeek);

        controller.on_breakpoint_change(false);
        assert_eq!(controller.state().view, ViewMode::ListWeek);
        assert_mirrors_engine(&controller);

        controller.on_breakpoint_change(true);
        assert_eq!(controller.state().view, ViewMode::DayGridMonth);
    }

    #[test]
    fn test_breakpoint_flip_before_mount_reaches_engine() {
        let mut controller: NavigationController<FakeEngine> =
            NavigationController::new(start(), true);

        controller.on_breakpoint_change(false);
        assert_eq!(controller.state().view, ViewMode::ListWeek);

        controller.mount(FakeEngine::default());
        controller.on_breakpoint_change(false);

        assert!(!controller.is_wide());
        assert_eq!(controller.engine().unwrap().view, Some(ViewMode::ListWeek));
        assert_mirrors_engine(&controller);
    }

    #[test]
    fn test_unchanged_breakpoint_keeps_view() {
        let mut controller = mounted(true);
        controller.change_view(ViewMode::TimeGridWeek);
        controller.on_breakpoint_change(true);
        assert_eq!(controller.state().view, ViewMode::TimeGridWeek);
    }

    #[test]
    fn test_unmount_returns_engine() {
        let mut controller = mounted(true);
        controller.go_to_next();
        let engine = controller.unmount().unwrap();
        assert_eq!(engine.calls, vec!["set_view", "next"]);
        assert!(!controller.is_mounted());
    }
}
