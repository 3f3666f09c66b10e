//! Single active chart.
//!
//! `ChartSession` owns the one rendered chart handle. `show` and `close` are
//! its only mutators, and both retire the held chart before anything else.

use crate::dataset::ChartSpec;
use log::debug;

/// The rendering collaborator: draws a chart and later frees it.
pub trait ChartRenderer {
    /// Opaque reference to one rendered chart.
    type Handle;

    /// Draw `spec` and return a handle for it.
    fn render(&mut self, spec: &ChartSpec) -> Self::Handle;

    /// Free everything held by `handle`.
    fn destroy(&mut self, handle: Self::Handle);

    /// Show or hide the chart container.
    fn set_visible(&mut self, _visible: bool) {}
}

/// Holds at most one live chart.
pub struct ChartSession<R: ChartRenderer> {
    renderer: R,
    current: Option<R::Handle>,
}

impl<R: ChartRenderer> ChartSession<R> {
    pub fn new(renderer: R) -> Self {
        ChartSession {
            renderer,
            current: None,
        }
    }

    /// Replace the current chart with one for `spec`.
    ///
    /// The previous chart is destroyed before the new one is rendered.
    pub fn show(&mut self, spec: &ChartSpec) -> &R::Handle {
        if let Some(previous) = self.current.take() {
            debug!("Destroying previous chart before rendering '{}'", spec.title);
            self.renderer.destroy(previous);
        }
        self.renderer.set_visible(true);
        self.current.insert(self.renderer.render(spec))
    }

    /// Hide the container and destroy the current chart, if any.
    ///
    /// Closing an empty session does nothing.
    pub fn close(&mut self) {
        if let Some(handle) = self.current.take() {
            debug!("Closing chart");
            self.renderer.set_visible(false);
            self.renderer.destroy(handle);
        }
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn handle(&self) -> Option<&R::Handle> {
        self.current.as_ref()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Render(u32, String),
        Destroy(u32),
        Visible(bool),
    }

    /// Records every call and tracks which handles are still alive.
    #[derive(Default)]
    struct RecordingRenderer {
        next_id: u32,
        live: Vec<u32>,
        events: Vec<Event>,
    }

    impl ChartRenderer for RecordingRenderer {
        type Handle = u32;

        fn render(&mut self, spec: &ChartSpec) -> u32 {
            self.next_id += 1;
            self.live.push(self.next_id);
            self.events.push(Event::Render(self.next_id, spec.title.clone()));
            self.next_id
        }

        fn destroy(&mut self, handle: u32) {
            assert!(self.live.contains(&handle), "double destroy of {handle}");
            self.live.retain(|h| *h != handle);
            self.events.push(Event::Destroy(handle));
        }

        fn set_visible(&mut self, visible: bool) {
            self.events.push(Event::Visible(visible));
        }
    }

    fn spec(title: &str) -> ChartSpec {
        ChartSpec {
            title: title.to_string(),
            labels: vec!["2023".to_string()],
            historical: vec![Some(100.0)],
            forecast: vec![None],
        }
    }

    #[test]
    fn test_show_returns_handle() {
        let mut session = ChartSession::new(RecordingRenderer::default());
        assert!(!session.is_open());
        let handle = *session.show(&spec("a"));
        assert_eq!(handle, 1);
        assert!(session.is_open());
        assert_eq!(session.handle(), Some(&1));
    }

    #[test]
    fn test_second_show_destroys_first_before_render() {
        let mut session = ChartSession::new(RecordingRenderer::default());
        session.show(&spec("a"));
        session.show(&spec("b"));

        assert_eq!(session.renderer().live, vec![2]);
        assert_eq!(
            session.renderer().events,
            vec![
                Event::Visible(true),
                Event::Render(1, "a".to_string()),
                Event::Destroy(1),
                Event::Visible(true),
                Event::Render(2, "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut session = ChartSession::new(RecordingRenderer::default());
        session.show(&spec("a"));
        session.close();
        session.close();

        assert!(!session.is_open());
        assert!(session.renderer().live.is_empty());
        let destroys = session
            .renderer()
            .events
            .iter()
            .filter(|e| matches!(e, Event::Destroy(_)))
            .count();
        assert_eq!(destroys, 1);
        assert_eq!(session.renderer().events.last(), Some(&Event::Destroy(1)));
    }

    #[test]
    fn test_close_on_empty_session_is_noop() {
        let mut session = ChartSession::new(RecordingRenderer::default());
        session.close();
        assert!(session.renderer().events.is_empty());
    }

    #[test]
    fn test_show_after_close() {
        let mut session = ChartSession::new(RecordingRenderer::default());
        session.show(&spec("a"));
        session.close();
        session.show(&spec("b"));
        assert_eq!(session.renderer().live, vec![2]);
        assert_eq!(session.handle(), Some(&2));
    }
}
