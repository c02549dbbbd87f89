use anyhow::Result;
use trishade_engine::core::{App, AppControl, FrameCtx};
use trishade_engine::input::{InputFrame, InputState, Key};
use trishade_engine::render::MeshRenderer;

use crate::scene;

/// Key that closes the window.
pub const CLOSE_KEY: Key = Key::Y;

/// What a frame does, decided before any GPU work.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum FrameStep {
    Close,
    UploadAndDraw,
    Draw,
}

/// Draws the fixed scene every frame until [`CLOSE_KEY`] is pressed.
pub struct ShapesApp {
    close_key: Key,
    meshes: MeshRenderer,
    uploaded: bool,
}

impl ShapesApp {
    pub fn new(close_key: Key) -> Self {
        Self {
            close_key,
            meshes: MeshRenderer::new(),
            uploaded: false,
        }
    }

    /// True while the close key is held, or if it was tapped since the last frame.
    pub fn should_close(&self, input: &InputState, input_frame: &InputFrame) -> bool {
        input.key_down(self.close_key) || input_frame.keys_pressed.contains(&self.close_key)
    }

    /// Closing wins over everything, so no GPU work happens on the last frame.
    fn next_step(&self, input: &InputState, input_frame: &InputFrame) -> FrameStep {
        if self.should_close(input, input_frame) {
            FrameStep::Close
        } else if !self.uploaded {
            FrameStep::UploadAndDraw
        } else {
            FrameStep::Draw
        }
    }

    fn upload_scene(&mut self, ctx: &FrameCtx<'_, '_>) -> Result<()> {
        let rctx = ctx.render_ctx();
        for (label, vertices) in scene::shapes() {
            let id = self.meshes.upload(&rctx, label, vertices)?;
            anyhow::ensure!(
                self.meshes.vertex_count(id) == Some(vertices.len() as u32),
                "mesh '{label}' uploaded with the wrong vertex count"
            );
        }
        Ok(())
    }
}

impl Default for ShapesApp {
    fn default() -> Self {
        Self::new(CLOSE_KEY)
    }
}

impl App for ShapesApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        match self.next_step(ctx.input, ctx.input_frame) {
            FrameStep::Close => {
                log::info!("{} pressed; closing after {} frames", self.close_key, ctx.frame_index);
                return AppControl::Exit;
            }
            FrameStep::UploadAndDraw => {
                if let Err(e) = self.upload_scene(ctx) {
                    log::error!("failed to upload scene: {e:#}");
                    return AppControl::Exit;
                }
                self.uploaded = true;
            }
            FrameStep::Draw => {}
        }

        let meshes = &mut self.meshes;
        ctx.render(scene::BACKGROUND, |rctx, target| {
            meshes.render(rctx, target, scene::FILL);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trishade_engine::input::{InputEvent, KeyState, Modifiers};

    fn key(state: &mut InputState, frame: &mut InputFrame, key: Key, key_state: KeyState) {
        state.apply_event(
            frame,
            InputEvent::Key {
                key,
                state: key_state,
                modifiers: Modifiers::default(),
                code: 0,
                repeat: false,
            },
        );
    }

    #[test]
    fn close_key_is_y() {
        assert_eq!(ShapesApp::default().close_key, Key::Y);
    }

    #[test]
    fn closes_while_close_key_held() {
        let app = ShapesApp::default();
        let mut input = InputState::default();
        let mut frame = InputFrame::default();
        assert!(!app.should_close(&input, &frame));

        key(&mut input, &mut frame, Key::Y, KeyState::Pressed);
        frame.clear();
        assert!(app.should_close(&input, &frame));
    }

    #[test]
    fn tap_between_frames_still_closes() {
        let app = ShapesApp::default();
        let mut input = InputState::default();
        let mut frame = InputFrame::default();

        key(&mut input, &mut frame, Key::Y, KeyState::Pressed);
        key(&mut input, &mut frame, Key::Y, KeyState::Released);
        assert!(!input.key_down(Key::Y));
        assert!(app.should_close(&input, &frame));
    }

    #[test]
    fn other_keys_keep_running() {
        let app = ShapesApp::default();
        let mut input = InputState::default();
        let mut frame = InputFrame::default();
        key(&mut input, &mut frame, Key::Escape, KeyState::Pressed);
        key(&mut input, &mut frame, Key::Q, KeyState::Pressed);
        assert!(!app.should_close(&input, &frame));
    }

    #[test]
    fn custom_close_key() {
        let app = ShapesApp::new(Key::Escape);
        let mut input = InputState::default();
        let mut frame = InputFrame::default();
        key(&mut input, &mut frame, Key::Escape, KeyState::Pressed);
        assert!(app.should_close(&input, &frame));
    }

    // ── frame steps ───────────────────────────────────────────────────────

    #[test]
    fn first_frame_uploads_then_later_frames_only_draw() {
        let mut app = ShapesApp::default();
        let input = InputState::default();
        let frame = InputFrame::default();

        assert_eq!(app.next_step(&input, &frame), FrameStep::UploadAndDraw);
        app.uploaded = true;
        assert_eq!(app.next_step(&input, &frame), FrameStep::Draw);
    }

    #[test]
    fn close_wins_before_first_upload() {
        let app = ShapesApp::default();
        let mut input = InputState::default();
        let mut frame = InputFrame::default();
        key(&mut input, &mut frame, Key::Y, KeyState::Pressed);

        assert!(!app.uploaded);
        assert_eq!(app.next_step(&input, &frame), FrameStep::Close);
    }

    #[test]
    fn close_wins_after_upload() {
        let mut app = ShapesApp::default();
        app.uploaded = true;
        let mut input = InputState::default();
        let mut frame = InputFrame::default();
        key(&mut input, &mut frame, Key::Y, KeyState::Pressed);

        assert_eq!(app.next_step(&input, &frame), FrameStep::Close);
    }
}
