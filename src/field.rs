//! Sprite field adapter
//!
//! [`SpriteField`] is what a block editor host talks to. The host owns the
//! surrounding lifecycle (drawing the field, click handling, undo) and
//! forwards the few calls that matter here:
//!
//! - [`SpriteField::init`] once the field is attached, to draw the first preview
//! - [`SpriteField::set_value`] when the document assigns new text
//! - [`SpriteField::show_editor`] on click, and [`SpriteField::editor_closed`]
//!   when the full editor goes away
//!
//! The field reports back through [`FieldHost`]: one `preview_updated` per
//! accepted change, and `value_changed` after an editor commit so the host
//! can record an undo step.

use serde_json::Value;

use crate::config::TargetRuntime;
use crate::literal::{ImageLiteralCodec, SpriteCodec};
use crate::models::Bitmap;
use crate::options::{parse_options, FieldConfig, RawOptions};
use crate::palettes::Palette;
use crate::preview::{render_preview, Preview, PreviewMode, PREVIEW_SIZE};
use crate::state::BitmapState;

/// Space between the field edge and the preview background
pub const PADDING: u32 = 5;

/// Space between the preview background edge and the thumbnail
pub const BG_PADDING: u32 = 4;

/// Edge length of the preview background
pub const BG_WIDTH: u32 = BG_PADDING * 2 + PREVIEW_SIZE;

/// Edge length of the whole field
pub const TOTAL_WIDTH: u32 = PADDING * 2 + BG_PADDING * 2 + PREVIEW_SIZE;

/// Axis-aligned rectangle in field coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Drawing instructions for the field's fixed chrome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    pub background: Rect,
    pub background_fill: &'static str,
    pub background_stroke: &'static str,
    pub background_stroke_width: u32,
    pub corner_radius: u32,
    /// Where the preview thumbnail goes
    pub image: Rect,
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self {
            background: Rect {
                x: PADDING,
                y: PADDING,
                width: BG_WIDTH,
                height: BG_WIDTH,
            },
            background_fill: "#dedede",
            background_stroke: "#898989",
            background_stroke_width: 1,
            corner_radius: 4,
            image: Rect {
                x: PADDING + BG_PADDING,
                y: PADDING + BG_PADDING,
                width: PREVIEW_SIZE,
                height: PREVIEW_SIZE,
            },
        }
    }
}

/// Callbacks into the block editor hosting the field.
pub trait FieldHost {
    /// A new thumbnail is ready to display.
    fn preview_updated(&mut self, preview: &Preview);

    /// The value changed through the full editor.
    fn value_changed(&mut self, old: &str, new: &str);

    /// Whether change events should be reported right now.
    fn events_enabled(&self) -> bool {
        true
    }
}

/// What the full editor is opened with
#[derive(Debug, Clone, PartialEq)]
pub struct EditorRequest {
    /// Current value of the field
    pub text: String,
    /// Field options, including the `filter` pass-through
    pub config: FieldConfig,
    /// State saved by the previous session of this field, if any
    pub persistent_state: Option<Value>,
}

/// Result of a full editor session that was confirmed
#[derive(Debug, Clone, PartialEq)]
pub struct EditorCommit {
    pub bitmap: Bitmap,
    /// Opaque state for resuming the next session
    pub persistent_state: Option<Value>,
}

/// The full-featured sprite editor.
///
/// `open` shows the editor and returns; the host calls
/// [`SpriteField::editor_closed`] when it is dismissed.
pub trait SpriteEditor {
    fn open(&mut self, request: EditorRequest);
}

/// A sprite-valued block field.
#[derive(Debug)]
pub struct SpriteField<C: SpriteCodec = ImageLiteralCodec> {
    config: FieldConfig,
    state: BitmapState<C>,
    palette: Palette,
    mode: PreviewMode,
    editor_state: Option<Value>,
    editor_open: bool,
    preview: Option<Preview>,
    initialized: bool,
}

impl SpriteField<ImageLiteralCodec> {
    /// Create a field using the `img` literal codec.
    pub fn with_literal_codec(
        text: Option<&str>,
        options: Option<&RawOptions>,
        runtime: &TargetRuntime,
    ) -> Self {
        Self::new(text, options, runtime, ImageLiteralCodec::default())
    }
}

impl<C: SpriteCodec> SpriteField<C> {
    /// Create a field from its initial text and raw block options.
    ///
    /// Nothing is rendered until [`init`](Self::init).
    pub fn new(
        text: Option<&str>,
        options: Option<&RawOptions>,
        runtime: &TargetRuntime,
        codec: C,
    ) -> Self {
        let config = parse_options(options, runtime.screen_size);
        let light_mode = options.is_some_and(|o| o.light_mode);
        let state = BitmapState::initialize(text, &config, codec);

        Self {
            config,
            state,
            palette: runtime.palette.clone(),
            mode: PreviewMode::from_light_mode(light_mode),
            editor_state: None,
            editor_open: false,
            preview: None,
            initialized: false,
        }
    }

    /// Draw the initial preview. Later calls do nothing.
    pub fn init(&mut self, host: &mut dyn FieldHost) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        self.refresh_preview(host);
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn bitmap(&self) -> &Bitmap {
        self.state.bitmap()
    }

    pub fn mode(&self) -> PreviewMode {
        self.mode
    }

    /// Latest rendered thumbnail
    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// Serialized value of the field.
    pub fn value(&self) -> String {
        self.state.to_text()
    }

    /// Assign a new value from the host.
    ///
    /// Text that does not decode to a non-empty sprite is ignored and the
    /// field keeps its current sprite. Returns whether the value was taken.
    pub fn set_value(&mut self, text: Option<&str>, host: &mut dyn FieldHost) -> bool {
        let Some(text) = text else {
            return false;
        };

        match self.state.set_from_text(text) {
            Ok(()) => {
                self.refresh_preview(host);
                true
            }
            Err(rejection) => {
                log::debug!("ignoring sprite value: {}", rejection);
                false
            }
        }
    }

    /// Open the full editor on the current value.
    ///
    /// Returns `false` without opening anything while a session is already open.
    pub fn show_editor(&mut self, editor: &mut dyn SpriteEditor) -> bool {
        if self.editor_open {
            log::debug!("sprite editor already open");
            return false;
        }

        editor.open(EditorRequest {
            text: self.value(),
            config: self.config.clone(),
            persistent_state: self.editor_state.clone(),
        });
        self.editor_open = true;
        true
    }

    pub fn is_editor_open(&self) -> bool {
        self.editor_open
    }

    /// Handle the full editor closing, with its result if it was confirmed.
    pub fn editor_closed(&mut self, outcome: Option<EditorCommit>, host: &mut dyn FieldHost) {
        self.editor_open = false;

        let Some(commit) = outcome else {
            return;
        };

        let old = self.value();
        self.state.set_from_commit(commit.bitmap);
        self.refresh_preview(host);
        self.editor_state = commit.persistent_state;

        if host.events_enabled() {
            let new = self.value();
            host.value_changed(&old, &new);
        }
    }

    /// Fixed footprint of the field, `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (TOTAL_WIDTH, TOTAL_WIDTH)
    }

    pub fn layout(&self) -> FieldLayout {
        FieldLayout::default()
    }

    fn refresh_preview(&mut self, host: &mut dyn FieldHost) {
        let (preview, warnings) = render_preview(self.state.bitmap(), &self.palette, self.mode);
        for warning in &warnings {
            log::warn!("{}", warning.message);
        }
        host.preview_updated(&preview);
        self.preview = Some(preview);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ScreenSize;
    use crate::preview::LIGHT_BACKGROUND;

    #[derive(Default)]
    struct RecordingHost {
        previews: usize,
        changes: Vec<(String, String)>,
        muted: bool,
    }

    impl FieldHost for RecordingHost {
        fn preview_updated(&mut self, preview: &Preview) {
            assert_eq!(preview.image().dimensions(), (PREVIEW_SIZE, PREVIEW_SIZE));
            self.previews += 1;
        }

        fn value_changed(&mut self, old: &str, new: &str) {
            self.changes.push((old.to_string(), new.to_string()));
        }

        fn events_enabled(&self) -> bool {
            !self.muted
        }
    }

    #[derive(Default)]
    struct RecordingEditor {
        requests: Vec<EditorRequest>,
    }

    impl SpriteEditor for RecordingEditor {
        fn open(&mut self, request: EditorRequest) {
            self.requests.push(request);
        }
    }

    fn field(text: Option<&str>) -> SpriteField {
        SpriteField::with_literal_codec(text, None, &TargetRuntime::default())
    }

    fn commit(bitmap: Bitmap) -> Option<EditorCommit> {
        Some(EditorCommit {
            bitmap,
            persistent_state: None,
        })
    }

    #[test]
    fn test_new_field_uses_options() {
        let options = RawOptions {
            sizes: Some("-1,-1".to_string()),
            filter: Some("tile".to_string()),
            ..Default::default()
        };
        let runtime = TargetRuntime {
            screen_size: Some(ScreenSize { width: 160, height: 120 }),
            ..Default::default()
        };
        let field = SpriteField::with_literal_codec(None, Some(&options), &runtime);
        assert_eq!(field.bitmap(), &Bitmap::new(160, 120));
        assert_eq!(field.config().filter.as_deref(), Some("tile"));
        assert_eq!(field.mode(), PreviewMode::Standard);
        assert!(field.preview().is_none());
    }

    #[test]
    fn test_new_field_keeps_existing_value() {
        let field = field(Some("img`\n1 2\n`"));
        assert_eq!(field.bitmap(), &Bitmap::from_rows(&[vec![1, 2]]));
        assert_eq!(field.value(), "img`\n1 2 \n`");
    }

    #[test]
    fn test_init_renders_once() {
        let mut host = RecordingHost::default();
        let mut field = field(None);
        field.init(&mut host);
        field.init(&mut host);
        assert!(field.is_initialized());
        assert_eq!(host.previews, 1);
        assert!(field.preview().is_some());
    }

    #[test]
    fn test_set_value_refreshes_once() {
        let mut host = RecordingHost::default();
        let mut field = field(None);
        assert!(field.set_value(Some("img`\n3 3\n3 3\n`"), &mut host));
        assert_eq!(host.previews, 1);
        assert_eq!(field.bitmap().get(1, 1), 3);
        // Host assignments are not editor changes
        assert!(host.changes.is_empty());
    }

    #[test]
    fn test_set_value_rejects_bad_text_without_refresh() {
        let mut host = RecordingHost::default();
        let mut field = field(Some("img`\n1\n`"));
        let before = field.value();

        assert!(!field.set_value(None, &mut host));
        assert!(!field.set_value(Some("not a sprite"), &mut host));
        assert!(!field.set_value(Some("img`\n`"), &mut host));
        assert_eq!(host.previews, 0);
        assert_eq!(field.value(), before);
    }

    #[test]
    fn test_editor_commit_replaces_and_notifies() {
        let mut host = RecordingHost::default();
        let mut editor = RecordingEditor::default();
        let mut field = field(None);
        let old = field.value();

        assert!(field.show_editor(&mut editor));
        assert_eq!(editor.requests[0].text, old);
        assert_eq!(editor.requests[0].persistent_state, None);

        let bitmap = Bitmap::from_rows(&[vec![4, 4], vec![0, 4]]);
        field.editor_closed(
            Some(EditorCommit {
                bitmap: bitmap.clone(),
                persistent_state: Some(serde_json::json!({"tool": "fill"})),
            }),
            &mut host,
        );

        assert_eq!(field.bitmap(), &bitmap);
        assert_eq!(host.previews, 1);
        assert_eq!(host.changes, vec![(old, field.value())]);
        assert!(!field.is_editor_open());

        // Saved state is offered to the next session
        field.show_editor(&mut editor);
        assert_eq!(
            editor.requests[1].persistent_state,
            Some(serde_json::json!({"tool": "fill"}))
        );
        assert_eq!(editor.requests[1].text, field.value());
    }

    #[test]
    fn test_editor_cancel_changes_nothing() {
        let mut host = RecordingHost::default();
        let mut editor = RecordingEditor::default();
        let mut field = field(None);
        let before = field.value();

        field.show_editor(&mut editor);
        field.editor_closed(None, &mut host);
        assert_eq!(field.value(), before);
        assert_eq!(host.previews, 0);
        assert!(host.changes.is_empty());
    }

    #[test]
    fn test_editor_commit_accepts_empty_bitmap() {
        let mut host = RecordingHost::default();
        let mut field = field(None);
        field.editor_closed(commit(Bitmap::new(0, 0)), &mut host);
        assert!(field.bitmap().is_empty());
        assert_eq!(host.previews, 1);
    }

    #[test]
    fn test_editor_commit_with_events_disabled() {
        let mut host = RecordingHost {
            muted: true,
            ..Default::default()
        };
        let mut field = field(None);
        field.editor_closed(commit(Bitmap::new(2, 2)), &mut host);
        assert_eq!(host.previews, 1);
        assert!(host.changes.is_empty());
    }

    #[test]
    fn test_only_one_editor_session() {
        let mut host = RecordingHost::default();
        let mut editor = RecordingEditor::default();
        let mut field = field(None);

        assert!(field.show_editor(&mut editor));
        assert!(!field.show_editor(&mut editor));
        assert_eq!(editor.requests.len(), 1);

        field.editor_closed(None, &mut host);
        assert!(field.show_editor(&mut editor));
    }

    #[test]
    fn test_light_mode_option() {
        let options = RawOptions {
            light_mode: true,
            ..Default::default()
        };
        let mut host = RecordingHost::default();
        let mut field = SpriteField::with_literal_codec(None, Some(&options), &TargetRuntime::default());
        field.init(&mut host);
        assert_eq!(field.mode(), PreviewMode::Light);
        let preview = field.preview().unwrap();
        assert!(preview.image().pixels().all(|p| *p == LIGHT_BACKGROUND));
    }

    #[test]
    fn test_layout_constants() {
        let field = field(None);
        assert_eq!(field.size(), (50, 50));
        let layout = field.layout();
        assert_eq!(layout.background, Rect { x: 5, y: 5, width: 40, height: 40 });
        assert_eq!(layout.image, Rect { x: 9, y: 9, width: 32, height: 32 });
    }
}
