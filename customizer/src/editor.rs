//! Editor state and its update cycle.
//!
//! Widgets never mutate state directly. They dispatch an [`EditorEvent`]; the
//! [`Editor`] applies it, re-renders the preview if anything changed and then
//! calls every subscriber with the new view.

use std::path::{Path, PathBuf};

use image::Rgb;
use tracing::{info, warn};

use crate::config::{AppConfig, SettingsStore};
use crate::export::{ExportError, ExportJob, default_export_path, parse_pixel_size};
use crate::preview::{Preview, render_preview};
use crate::status::Status;

/// Everything the user can edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    pub text: String,
    /// Raw contents of the pixel size field, validated only on export.
    pub pixel_size_input: String,
    pub border: u32,
    pub foreground: Rgb<u8>,
    pub background: Rgb<u8>,
}

impl EditorState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            text: String::new(),
            pixel_size_input: config.pixel_size.to_string(),
            border: config.border,
            foreground: config.foreground,
            background: config.background,
        }
    }

    /// Apply `event`, returning whether anything changed.
    pub fn apply(&mut self, event: EditorEvent, config: &AppConfig) -> bool {
        let before = self.clone();
        match event {
            EditorEvent::TextChanged(text) => self.text = text,
            EditorEvent::PixelSizeChanged(size) => self.pixel_size_input = size,
            EditorEvent::BorderChanged(border) => self.border = border,
            EditorEvent::ForegroundChanged(color) => self.foreground = color,
            EditorEvent::BackgroundChanged(color) => self.background = color,
            EditorEvent::Reset => *self = Self::from_config(config),
        }
        *self != before
    }
}

/// A single user edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    TextChanged(String),
    PixelSizeChanged(String),
    BorderChanged(u32),
    ForegroundChanged(Rgb<u8>),
    BackgroundChanged(Rgb<u8>),
    /// Back to the configured defaults, clearing the text.
    Reset,
}

/// Read-only snapshot handed to subscribers.
#[derive(Debug, Clone, Copy)]
pub struct EditorView<'a> {
    pub state: &'a EditorState,
    pub preview: &'a Preview,
    pub status: &'a Status,
}

type Subscriber = Box<dyn FnMut(&EditorView<'_>)>;

/// Owns the editor state and drives preview and export.
pub struct Editor {
    config: AppConfig,
    state: EditorState,
    preview: Preview,
    status: Status,
    subscribers: Vec<Subscriber>,
}

impl Editor {
    pub fn new(config: AppConfig) -> Self {
        let state = EditorState::from_config(&config);
        Self {
            config,
            state,
            preview: Preview::Cleared,
            status: Status::Ready,
            subscribers: Vec::new(),
        }
    }

    /// Register an on-change callback. Callbacks run in registration order.
    pub fn subscribe(&mut self, callback: impl FnMut(&EditorView<'_>) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    /// Apply an edit. Re-renders and notifies only when the state changed.
    pub fn dispatch(&mut self, event: EditorEvent) -> bool {
        if !self.state.apply(event, &self.config) {
            return false;
        }
        self.refresh_preview();
        true
    }

    /// Validate, ask `choose_path` for a destination and write the PNG.
    ///
    /// `choose_path` receives a suggested path and returns `None` when the
    /// user cancels. Validation happens before it is called.
    pub fn export_with(
        &mut self,
        choose_path: impl FnOnce(&Path) -> Option<PathBuf>,
    ) -> Result<Option<PathBuf>, ExportError> {
        let job = match ExportJob::from_state(&self.state) {
            Ok(job) => job,
            Err(e) => {
                self.set_status(Status::Error(e.to_string()));
                return Err(e);
            }
        };

        let suggested = default_export_path(&self.config);
        let Some(destination) = choose_path(&suggested) else {
            info!("Export canceled");
            self.set_status(Status::SaveCanceled);
            return Ok(None);
        };

        match job.write_png(&destination) {
            Ok(path) => {
                self.set_status(Status::Saved {
                    path: path.clone(),
                    size: job.pixel_size,
                    border: job.border,
                });
                Ok(Some(path))
            }
            Err(e) => {
                warn!("Export failed: {e}");
                let reason = match &e {
                    ExportError::Render(inner) => inner.to_string(),
                    ExportError::Image(inner) => inner.to_string(),
                    ExportError::Io(inner) => inner.to_string(),
                    other => other.to_string(),
                };
                self.set_status(Status::Error(reason));
                Err(e)
            }
        }
    }

    /// Persist the current parameters as the new defaults.
    pub fn save_as_defaults(&mut self, store: &mut SettingsStore) -> Result<(), anyhow::Error> {
        let mut config = self.config.clone();
        if let Some(size) = parse_pixel_size(&self.state.pixel_size_input) {
            config.pixel_size = size;
        }
        config.border = self.state.border;
        config.foreground = self.state.foreground;
        config.background = self.state.background;
        config.store_into(store)?;
        store.save()?;
        self.config = config;
        Ok(())
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn refresh_preview(&mut self) {
        let (preview, status) = render_preview(&self.state, self.config.preview_size);
        self.preview = preview;
        self.status = status;
        self.notify();
    }

    fn set_status(&mut self, status: Status) {
        self.status = status;
        self.notify();
    }

    fn notify(&mut self) {
        let view = EditorView {
            state: &self.state,
            preview: &self.preview,
            status: &self.status,
        };
        for subscriber in self.subscribers.iter_mut() {
            subscriber(&view);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const BLUE: Rgb<u8> = Rgb([0x3a, 0x7b, 0xd5]);

    /// Editor plus a log of every status its subscriber saw.
    fn recording_editor() -> (Editor, Rc<RefCell<Vec<String>>>) {
        let mut editor = Editor::new(AppConfig::default());
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        editor.subscribe(move |view| sink.borrow_mut().push(view.status.to_string()));
        (editor, log)
    }

    #[test]
    fn initial_state_comes_from_config() {
        let config = AppConfig {
            pixel_size: 128,
            border: 4,
            ..AppConfig::default()
        };
        let editor = Editor::new(config);
        assert_eq!(editor.state().pixel_size_input, "128");
        assert_eq!(editor.state().border, 4);
        assert_eq!(editor.preview(), &Preview::Cleared);
        assert_eq!(editor.status(), &Status::Ready);
    }

    #[test]
    fn typing_renders_preview_and_notifies() {
        let (mut editor, log) = recording_editor();
        assert!(editor.dispatch(EditorEvent::TextChanged("https://example.com".into())));
        assert_eq!(editor.preview().image().unwrap().dimensions(), (200, 200));
        assert_eq!(*log.borrow(), ["Preview updated (200x200px, border=1)"]);
    }

    #[test]
    fn unchanged_value_does_not_notify() {
        let (mut editor, log) = recording_editor();
        editor.dispatch(EditorEvent::TextChanged("abc".into()));
        assert!(!editor.dispatch(EditorEvent::TextChanged("abc".into())));
        assert!(!editor.dispatch(EditorEvent::BorderChanged(1)));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn clearing_text_clears_preview() {
        let (mut editor, log) = recording_editor();
        editor.dispatch(EditorEvent::TextChanged("abc".into()));
        editor.dispatch(EditorEvent::TextChanged("  ".into()));
        assert_eq!(editor.preview(), &Preview::Cleared);
        assert_eq!(log.borrow().last().unwrap(), "Ready");
    }

    #[test]
    fn color_change_rerenders_with_new_color() {
        let (mut editor, _) = recording_editor();
        editor.dispatch(EditorEvent::TextChanged("https://example.com".into()));
        editor.dispatch(EditorEvent::ForegroundChanged(BLUE));
        let img = editor.preview().image().unwrap();
        assert!(img.pixels().any(|p| *p == BLUE));
        assert!(img.pixels().all(|p| *p == BLUE || *p == Rgb([255, 255, 255])));
    }

    #[test]
    fn subscribers_run_in_registration_order() {
        let mut editor = Editor::new(AppConfig::default());
        let order = Rc::new(RefCell::new(Vec::new()));
        for id in 0..3 {
            let order = Rc::clone(&order);
            editor.subscribe(move |_| order.borrow_mut().push(id));
        }
        editor.dispatch(EditorEvent::TextChanged("x".into()));
        assert_eq!(*order.borrow(), [0, 1, 2]);
    }

    #[test]
    fn reset_restores_config_defaults() {
        let (mut editor, _) = recording_editor();
        editor.dispatch(EditorEvent::TextChanged("abc".into()));
        editor.dispatch(EditorEvent::BorderChanged(7));
        assert!(editor.dispatch(EditorEvent::Reset));
        assert_eq!(editor.state(), &EditorState::from_config(&AppConfig::default()));
        assert!(!editor.dispatch(EditorEvent::Reset));
    }

    #[test]
    fn export_validates_before_asking_for_path() {
        let (mut editor, _) = recording_editor();
        let err = editor
            .export_with(|_| panic!("dialog must not open for empty text"))
            .unwrap_err();
        assert!(matches!(err, ExportError::EmptyText));

        editor.dispatch(EditorEvent::TextChanged("hello".into()));
        editor.dispatch(EditorEvent::PixelSizeChanged("0".into()));
        let err = editor
            .export_with(|_| panic!("dialog must not open for a bad size"))
            .unwrap_err();
        assert!(matches!(err, ExportError::InvalidPixelSize));
    }

    #[test]
    fn rejected_export_reports_status() {
        let (mut editor, log) = recording_editor();
        editor.export_with(|_| None).unwrap_err();
        assert_eq!(
            editor.status(),
            &Status::Error("Please enter text or a URL to encode.".into())
        );
        assert_eq!(
            log.borrow().last().unwrap(),
            "Error: Please enter text or a URL to encode."
        );

        editor.dispatch(EditorEvent::TextChanged("hello".into()));
        editor.dispatch(EditorEvent::PixelSizeChanged("abc".into()));
        editor.export_with(|_| None).unwrap_err();
        assert_eq!(
            log.borrow().last().unwrap(),
            "Error: Pixel size must be a positive integer."
        );
    }

    #[test]
    fn huge_border_preview_does_not_blow_up() {
        let (mut editor, _) = recording_editor();
        editor.dispatch(EditorEvent::TextChanged("https://example.com".into()));
        assert!(editor.dispatch(EditorEvent::BorderChanged(100_000)));
        assert_eq!(editor.preview().image().unwrap().dimensions(), (200, 200));
    }

    #[test]
    fn canceled_export_writes_nothing() {
        let (mut editor, log) = recording_editor();
        editor.dispatch(EditorEvent::TextChanged("hello".into()));
        let result = editor.export_with(|_| None).unwrap();
        assert!(result.is_none());
        assert_eq!(editor.status(), &Status::SaveCanceled);
        assert_eq!(log.borrow().last().unwrap(), "Save canceled.");
    }

    #[test]
    fn export_writes_png_at_requested_size() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("code");
        let (mut editor, _) = recording_editor();
        editor.dispatch(EditorEvent::TextChanged("https://example.com".into()));
        editor.dispatch(EditorEvent::PixelSizeChanged("40".into()));
        editor.dispatch(EditorEvent::BorderChanged(4));

        let written = editor
            .export_with(|suggested| {
                assert_eq!(suggested.extension().unwrap(), "png");
                Some(target.clone())
            })
            .unwrap()
            .unwrap();

        assert_eq!(written, dir.path().join("code.png"));
        let img = image::open(&written).unwrap();
        assert_eq!((img.width(), img.height()), (40, 40));
        assert_eq!(
            editor.status().to_string(),
            format!("Saved: {} (40x40px, border=4)", written.display())
        );
    }

    #[test]
    fn failed_export_keeps_editor_usable() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where a directory is expected
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();

        let (mut editor, _) = recording_editor();
        editor.dispatch(EditorEvent::TextChanged("hello".into()));
        let err = editor
            .export_with(|_| Some(blocker.join("qr.png")))
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to generate or save QR:"));
        assert!(editor.status().is_error());

        assert!(editor.dispatch(EditorEvent::TextChanged("hello again".into())));
        assert!(editor.preview().image().is_some());
    }

    #[test]
    fn save_as_defaults_persists_current_parameters() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SettingsStore::open(dir.path().join("settings.json")).unwrap();
        let (mut editor, _) = recording_editor();
        editor.dispatch(EditorEvent::PixelSizeChanged("256".into()));
        editor.dispatch(EditorEvent::BorderChanged(4));
        editor.dispatch(EditorEvent::BackgroundChanged(BLUE));
        editor.save_as_defaults(&mut store).unwrap();

        let reopened = SettingsStore::open(dir.path().join("settings.json")).unwrap();
        let config = AppConfig::load_with_env(&reopened, |_| None).unwrap();
        assert_eq!(config.pixel_size, 256);
        assert_eq!(config.border, 4);
        assert_eq!(config.background, BLUE);
        assert_eq!(editor.config(), &config);
    }
}
