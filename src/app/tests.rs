use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use crate::ai::{AiAction, AiReply, GenerateError};
use crate::document::{Direction, Document};
use crate::ui::style::Theme;

use super::event_loop::ResizeDebouncer;
use super::model::{PromptKind, SIDEBAR_ROWS, SPLIT_MIN_WIDTH};
use super::{App, Message, Model, ToastLevel, ViewMode, update};

fn create_test_model() -> Model {
    let doc = Document::new("# Test\n\nHello world", "test.md");
    Model::new(doc, Theme::Light, ViewMode::Split, (120, 24))
}

fn create_long_test_model() -> Model {
    // A document with enough content to scroll the preview
    let mut md = String::from("# Test Document\n\n");
    for i in 1..=50 {
        md.push_str(&format!("Line {} of content.\n\n", i));
    }
    let doc = Document::new(&md, "test.md");
    Model::new(doc, Theme::Light, ViewMode::Preview, (120, 24))
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

#[test]
fn test_insert_char_updates_document_and_preview() {
    let doc = Document::new("", "test.md");
    let model = Model::new(doc, Theme::Light, ViewMode::Split, (120, 24));
    let model = update(model, Message::InsertChar('#'));
    let model = update(model, Message::InsertChar(' '));
    let model = update(model, Message::InsertChar('h'));
    assert_eq!(model.document.text(), "# h");
    assert!(model.document.is_dirty());
    assert!(!model.preview_lines.is_empty());
    assert_eq!(model.preview_lines[0].text(), "h");
}

#[test]
fn test_newline_splits_line() {
    let doc = Document::new("ab", "test.md");
    let mut model = Model::new(doc, Theme::Light, ViewMode::Edit, (120, 24));
    model.document.move_cursor(Direction::Right);
    let model = update(model, Message::InsertNewline);
    assert_eq!(model.document.line_count(), 2);
    assert_eq!(model.document.cursor().line, 1);
}

#[test]
fn test_paste_inserts_multiline_text() {
    let doc = Document::new("", "test.md");
    let model = Model::new(doc, Theme::Light, ViewMode::Edit, (120, 24));
    let model = update(model, Message::Paste("# Title\n\nbody".to_string()));
    assert_eq!(model.document.text(), "# Title\n\nbody");
    assert_eq!(model.document.cursor().line, 2);
    assert!(model.document.is_dirty());
    assert!(!model.preview_lines.is_empty());
}

#[test]
fn test_paste_normalizes_crlf() {
    let doc = Document::new("", "test.md");
    let model = Model::new(doc, Theme::Light, ViewMode::Edit, (120, 24));
    let model = update(model, Message::Paste("one\r\ntwo\rthree".to_string()));
    assert_eq!(model.document.text(), "one\ntwo\nthree");
}

#[test]
fn test_scroll_down_updates_viewport() {
    let model = create_long_test_model();
    let model = update(model, Message::ScrollDown(5));
    assert_eq!(model.viewport.offset(), 5);
}

#[test]
fn test_scroll_up_updates_viewport() {
    let mut model = create_long_test_model();
    model.viewport.scroll_down(10);
    let model = update(model, Message::ScrollUp(3));
    assert_eq!(model.viewport.offset(), 7);
}

#[test]
fn test_half_page_scrolls_half_the_content_height() {
    let model = create_long_test_model();
    let half = model.content_height() as usize / 2;
    let model = update(model, Message::HalfPageDown);
    assert_eq!(model.viewport.offset(), half);
    let model = update(model, Message::HalfPageUp);
    assert_eq!(model.viewport.offset(), 0);
}

#[test]
fn test_cycle_theme_wraps_around() {
    let model = create_test_model();
    assert_eq!(model.theme, Theme::Light);

    let model = update(model, Message::CycleTheme);
    assert_eq!(model.theme, Theme::Dark);

    let model = update(model, Message::CycleTheme);
    assert_eq!(model.theme, Theme::Dracula);

    let model = update(model, Message::CycleTheme);
    assert_eq!(model.theme, Theme::Light);
}

#[test]
fn test_set_view_mode() {
    let model = create_test_model();
    let model = update(model, Message::SetViewMode(ViewMode::Preview));
    assert_eq!(model.view_mode, ViewMode::Preview);
}

#[test]
fn test_narrow_resize_coerces_split_to_edit() {
    let model = create_test_model();
    assert_eq!(model.view_mode, ViewMode::Split);

    let model = update(model, Message::Resize(SPLIT_MIN_WIDTH - 1, 24));
    assert_eq!(model.view_mode, ViewMode::Edit);
}

#[test]
fn test_narrow_resize_leaves_preview_alone() {
    let mut model = create_test_model();
    model.view_mode = ViewMode::Preview;

    let model = update(model, Message::Resize(40, 24));
    assert_eq!(model.view_mode, ViewMode::Preview);
}

#[test]
fn test_wide_resize_does_not_restore_split() {
    let model = create_test_model();
    let model = update(model, Message::Resize(SPLIT_MIN_WIDTH - 1, 24));
    assert_eq!(model.view_mode, ViewMode::Edit);

    let model = update(model, Message::Resize(SPLIT_MIN_WIDTH + 20, 24));
    assert_eq!(model.view_mode, ViewMode::Edit);
}

#[test]
fn test_narrow_startup_coerces_split() {
    let doc = Document::new("hi", "test.md");
    let model = Model::new(doc, Theme::Light, ViewMode::Split, (60, 24));
    assert_eq!(model.view_mode, ViewMode::Edit);
}

#[test]
fn test_toggle_ai_sidebar() {
    let model = create_test_model();
    assert!(!model.ai_open);

    let model = update(model, Message::ToggleAiSidebar);
    assert!(model.ai_open);

    let model = update(model, Message::ToggleAiSidebar);
    assert!(!model.ai_open);
}

#[test]
fn test_closing_sidebar_clears_analysis() {
    let mut model = create_test_model();
    model.ai_open = true;
    model.ai_result = Some("analysis".to_string());

    let model = update(model, Message::CloseAiSidebar);
    assert!(!model.ai_open);
    assert!(model.ai_result.is_none());
}

#[test]
fn test_sidebar_selection_clamps() {
    let mut model = create_test_model();
    model.ai_open = true;

    let model = update(model, Message::SidebarUp);
    assert_eq!(model.sidebar_selected, 0);

    let mut model = model;
    for _ in 0..10 {
        model = update(model, Message::SidebarDown);
    }
    assert_eq!(model.sidebar_selected, SIDEBAR_ROWS - 1);
}

#[test]
fn test_ai_request_marks_pending() {
    let model = create_test_model();
    let model = update(
        model,
        Message::AiRequest {
            instruction: "do something".to_string(),
            action: AiAction::Replace,
        },
    );
    assert!(model.ai_pending);
}

#[test]
fn test_ai_replace_overwrites_document() {
    let mut model = create_test_model();
    model.ai_pending = true;
    let model = update(
        model,
        Message::AiResolved(AiReply {
            action: AiAction::Replace,
            result: Ok("# Rewritten".to_string()),
        }),
    );
    assert!(!model.ai_pending);
    assert_eq!(model.document.text(), "# Rewritten");
    assert!(model.document.is_dirty());
}

#[test]
fn test_ai_append_keeps_existing_content() {
    let mut model = create_test_model();
    model.ai_pending = true;
    let model = update(
        model,
        Message::AiResolved(AiReply {
            action: AiAction::Append,
            result: Ok("More text.".to_string()),
        }),
    );
    assert_eq!(model.document.text(), "# Test\n\nHello world\n\nMore text.");
}

#[test]
fn test_ai_analyze_shows_result_without_touching_document() {
    let mut model = create_test_model();
    model.ai_open = true;
    model.ai_pending = true;
    let before = model.document.text();
    let model = update(
        model,
        Message::AiResolved(AiReply {
            action: AiAction::Analyze,
            result: Ok("Three words about tests.".to_string()),
        }),
    );
    assert_eq!(model.document.text(), before);
    assert_eq!(model.ai_result.as_deref(), Some("Three words about tests."));
}

#[test]
fn test_ai_analyze_after_sidebar_closed_is_dropped() {
    let mut model = create_test_model();
    model.ai_pending = true;
    let model = update(
        model,
        Message::AiResolved(AiReply {
            action: AiAction::Analyze,
            result: Ok("late analysis".to_string()),
        }),
    );
    assert!(!model.ai_open);
    assert!(model.ai_result.is_none());
}

#[test]
fn test_ai_empty_result_is_a_noop_with_toast() {
    let mut model = create_test_model();
    model.ai_pending = true;
    let before = model.document.text();
    let model = update(
        model,
        Message::AiResolved(AiReply {
            action: AiAction::Replace,
            result: Ok("   \n".to_string()),
        }),
    );
    assert_eq!(model.document.text(), before);
    let (_, level) = model.active_toast().unwrap();
    assert_eq!(level, ToastLevel::Info);
}

#[test]
fn test_ai_failure_shows_error_toast_and_keeps_document() {
    let mut model = create_test_model();
    model.ai_pending = true;
    let before = model.document.text();
    let model = update(
        model,
        Message::AiResolved(AiReply {
            action: AiAction::Replace,
            result: Err(GenerateError::MissingApiKey),
        }),
    );
    assert_eq!(model.document.text(), before);
    let (message, level) = model.active_toast().unwrap();
    assert_eq!(level, ToastLevel::Error);
    assert!(message.contains("GEMINI_API_KEY"));
}

#[test]
fn test_rename_normalizes_via_document() {
    let model = create_test_model();
    let model = update(model, Message::RenameFile("  notes  ".to_string()));
    assert_eq!(model.document.file_name(), "notes");
}

#[test]
fn test_rename_to_blank_is_rejected() {
    let model = create_test_model();
    let model = update(model, Message::RenameFile("   ".to_string()));
    assert_eq!(model.document.file_name(), "test.md");
    let (_, level) = model.active_toast().unwrap();
    assert_eq!(level, ToastLevel::Warning);
}

#[test]
fn test_prompt_flow() {
    let model = create_test_model();
    let model = update(model, Message::StartRenamePrompt);
    let prompt = model.prompt.as_ref().unwrap();
    assert_eq!(prompt.kind, PromptKind::Rename);
    assert_eq!(prompt.input, "test.md");

    let model = update(model, Message::FilePromptInput("draft.md".to_string()));
    assert_eq!(model.prompt.as_ref().unwrap().input, "draft.md");

    let model = update(model, Message::FilePromptCancel);
    assert!(model.prompt.is_none());
    assert_eq!(model.document.file_name(), "test.md");
}

#[test]
fn test_toggle_help() {
    let model = create_test_model();
    let model = update(model, Message::ToggleHelp);
    assert!(model.help_visible);
    let model = update(model, Message::HideHelp);
    assert!(!model.help_visible);
}

#[test]
fn test_quit_sets_flag() {
    let model = create_test_model();
    let model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_toast_expires() {
    let mut model = create_test_model();
    model.show_toast(ToastLevel::Info, "hello");
    assert!(model.active_toast().is_some());

    assert!(!model.expire_toast(Instant::now()));
    assert!(model.expire_toast(Instant::now() + Duration::from_secs(5)));
    assert!(model.active_toast().is_none());
}

#[test]
fn test_follow_cursor_scrolls_editor() {
    let mut md = String::new();
    for i in 0..100 {
        md.push_str(&format!("line {i}\n"));
    }
    let doc = Document::new(&md, "test.md");
    let mut model = Model::new(doc, Theme::Light, ViewMode::Edit, (120, 24));
    model.document.move_to(80, 0);
    model.follow_cursor();
    let height = model.content_height() as usize;
    assert!(model.editor_scroll <= 80);
    assert!(80 < model.editor_scroll + height);
}

// Key handling

#[test]
fn test_ctrl_q_quits_from_every_mode() {
    let app = App::new();
    for mode in [ViewMode::Edit, ViewMode::Split, ViewMode::Preview] {
        let mut model = create_test_model();
        model.view_mode = mode;
        assert_eq!(app.handle_key(ctrl('q'), &model), Some(Message::Quit));
    }
}

#[test]
fn test_plain_chars_insert_in_edit_mode() {
    let app = App::new();
    let model = create_test_model();
    assert_eq!(
        app.handle_key(key(KeyCode::Char('q')), &model),
        Some(Message::InsertChar('q'))
    );
}

#[test]
fn test_q_quits_in_preview_mode() {
    let app = App::new();
    let mut model = create_test_model();
    model.view_mode = ViewMode::Preview;
    assert_eq!(
        app.handle_key(key(KeyCode::Char('q')), &model),
        Some(Message::Quit)
    );
}

#[test]
fn test_half_page_keys_in_preview_mode() {
    let app = App::new();
    let mut model = create_long_test_model();
    assert_eq!(
        app.handle_key(key(KeyCode::Char('d')), &model),
        Some(Message::HalfPageDown)
    );
    assert_eq!(app.handle_key(key(KeyCode::Char('u')), &model), None);

    model.viewport.scroll_down(10);
    assert_eq!(
        app.handle_key(key(KeyCode::Char('u')), &model),
        Some(Message::HalfPageUp)
    );
}

#[test]
fn test_paste_event_reaches_the_editor() {
    let app = App::new();
    let model = create_test_model();
    let mut debouncer = ResizeDebouncer::new(100);
    let msg = app.handle_event(Event::Paste("pasted".to_string()), &model, 0, &mut debouncer);
    assert_eq!(msg, Some(Message::Paste("pasted".to_string())));
}

#[test]
fn test_paste_event_ignored_outside_the_editor() {
    let app = App::new();
    let mut model = create_test_model();
    model.view_mode = ViewMode::Preview;
    let mut debouncer = ResizeDebouncer::new(100);
    let msg = app.handle_event(Event::Paste("pasted".to_string()), &model, 0, &mut debouncer);
    assert_eq!(msg, None);
}

#[test]
fn test_f3_is_ignored_when_too_narrow() {
    let app = App::new();
    let mut model = create_test_model();
    model.width = SPLIT_MIN_WIDTH - 1;
    model.view_mode = ViewMode::Edit;
    assert_eq!(app.handle_key(key(KeyCode::F(3)), &model), None);
}

#[test]
fn test_any_key_closes_help() {
    let app = App::new();
    let mut model = create_test_model();
    model.help_visible = true;
    assert_eq!(
        app.handle_key(key(KeyCode::Char('x')), &model),
        Some(Message::HideHelp)
    );
}

#[test]
fn test_prompt_captures_typing() {
    let app = App::new();
    let model = update(create_test_model(), Message::StartOpenPrompt);
    assert_eq!(
        app.handle_key(key(KeyCode::Char('a')), &model),
        Some(Message::FilePromptInput("a".to_string()))
    );
    assert_eq!(
        app.handle_key(key(KeyCode::Enter), &model),
        Some(Message::OpenFile(String::new()))
    );
    assert_eq!(
        app.handle_key(key(KeyCode::Esc), &model),
        Some(Message::FilePromptCancel)
    );
}

#[test]
fn test_sidebar_enter_runs_selected_quick_action() {
    let app = App::new();
    let mut model = create_test_model();
    model.ai_open = true;
    model.sidebar_selected = 0;
    let msg = app.handle_key(key(KeyCode::Enter), &model);
    let Some(Message::AiRequest { action, .. }) = msg else {
        panic!("expected an AI request, got {msg:?}");
    };
    assert_eq!(action, crate::ai::QUICK_ACTIONS[0].action);
}

#[test]
fn test_sidebar_custom_prompt_requires_text() {
    let app = App::new();
    let mut model = create_test_model();
    model.ai_open = true;
    model.sidebar_selected = SIDEBAR_ROWS - 1;
    assert_eq!(app.handle_key(key(KeyCode::Enter), &model), None);

    model.ai_prompt = "rewrite as a haiku".to_string();
    let msg = app.handle_key(key(KeyCode::Enter), &model);
    assert_eq!(
        msg,
        Some(Message::AiRequest {
            instruction: "rewrite as a haiku".to_string(),
            action: AiAction::Replace,
        })
    );
}

#[test]
fn test_sidebar_ignores_enter_while_pending() {
    let app = App::new();
    let mut model = create_test_model();
    model.ai_open = true;
    model.ai_pending = true;
    assert_eq!(app.handle_key(key(KeyCode::Enter), &model), None);
}

#[test]
fn test_resize_debouncer_waits_for_delay() {
    let mut debouncer = ResizeDebouncer::new(100);
    debouncer.queue(100, 40, 1000);
    assert!(debouncer.is_pending());
    assert_eq!(debouncer.take_ready(1050), None);
    assert_eq!(debouncer.take_ready(1100), Some((100, 40)));
    assert!(!debouncer.is_pending());
}

#[test]
fn test_resize_debouncer_keeps_latest_size() {
    let mut debouncer = ResizeDebouncer::new(100);
    debouncer.queue(100, 40, 1000);
    debouncer.queue(90, 30, 1040);
    assert_eq!(debouncer.take_ready(1200), Some((90, 30)));
}

// Side effects

mod side_effects {
    use std::sync::Arc;
    use std::sync::mpsc;

    use super::*;
    use crate::ai::Generator;

    struct CannedGenerator(Result<String, GenerateError>);

    impl Generator for CannedGenerator {
        fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
            self.0.clone()
        }
    }

    #[test]
    fn test_save_writes_file_and_clears_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let name = dir.path().join("out").display().to_string();
        let app = App::new();
        let mut model = create_test_model();
        model.document.set_file_name(&name);
        model.document.insert_char('x');
        assert!(model.document.is_dirty());

        let (tx, _rx) = mpsc::channel();
        app.handle_message_side_effects(&mut model, &tx, &Message::SaveDocument);

        let written = std::fs::read_to_string(format!("{name}.md")).unwrap();
        assert_eq!(written, model.document.text());
        assert!(!model.document.is_dirty());
    }

    #[test]
    fn test_export_pdf_writes_pdf_file() {
        let dir = tempfile::tempdir().unwrap();
        let name = dir.path().join("doc.md").display().to_string();
        let app = App::new();
        let mut model = create_test_model();
        model.document.set_file_name(&name);

        let (tx, _rx) = mpsc::channel();
        app.handle_message_side_effects(&mut model, &tx, &Message::ExportPdf);

        let pdf_path = dir.path().join("doc.pdf");
        let bytes = std::fs::read(pdf_path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_open_loads_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loaded.md");
        std::fs::write(&path, "# Loaded\n").unwrap();

        let app = App::new();
        let mut model = create_test_model();
        let (tx, _rx) = mpsc::channel();
        app.handle_message_side_effects(
            &mut model,
            &tx,
            &Message::OpenFile(path.display().to_string()),
        );

        assert_eq!(model.document.text(), "# Loaded\n");
        assert_eq!(model.document.file_name(), "loaded.md");
        assert!(!model.document.is_dirty());
    }

    #[test]
    fn test_open_missing_file_shows_error() {
        let app = App::new();
        let mut model = create_test_model();
        let before = model.document.text();
        let (tx, _rx) = mpsc::channel();
        app.handle_message_side_effects(
            &mut model,
            &tx,
            &Message::OpenFile("/nonexistent/nope.md".to_string()),
        );

        assert_eq!(model.document.text(), before);
        let (_, level) = model.active_toast().unwrap();
        assert_eq!(level, ToastLevel::Error);
    }

    #[test]
    fn test_ai_request_without_generator_clears_pending() {
        let app = App::new();
        let mut model = create_test_model();
        model.ai_pending = true;
        let (tx, _rx) = mpsc::channel();
        app.handle_message_side_effects(
            &mut model,
            &tx,
            &Message::AiRequest {
                instruction: "x".to_string(),
                action: AiAction::Replace,
            },
        );
        assert!(!model.ai_pending);
        let (_, level) = model.active_toast().unwrap();
        assert_eq!(level, ToastLevel::Error);
    }

    #[test]
    fn test_ai_request_delivers_reply_over_channel() {
        let app =
            App::new().with_generator(Some(Arc::new(CannedGenerator(Ok("done".to_string())))));
        let mut model = create_test_model();
        let (tx, rx) = mpsc::channel();
        app.handle_message_side_effects(
            &mut model,
            &tx,
            &Message::AiRequest {
                instruction: "x".to_string(),
                action: AiAction::Append,
            },
        );
        let reply = rx.recv_timeout(std::time::Duration::from_secs(5)).unwrap();
        assert_eq!(reply.action, AiAction::Append);
        assert_eq!(reply.result.unwrap(), "done");
    }
}
