//! Item Edit Session
//!
//! The edit half of one list item: its form view, the draft shown in it,
//! the pending-mutation flags and the Escape subscription held while open.

use crate::escape::Subscription;
use crate::models::{Mode, MutationState, Point};
use crate::surface::{EditForm, ViewId, ViewSpec};

use super::{EditorKey, Gesture, ItemKey, RenderCtx};

#[derive(Debug)]
pub struct ItemEditSession {
    key: ItemKey,
    mode: Mode,
    editor: Option<ViewId>,
    draft: Option<Point>,
    state: MutationState,
    escape: Option<Subscription>,
}

impl ItemEditSession {
    pub fn new(key: ItemKey) -> Self {
        Self {
            key,
            mode: Mode::Default,
            editor: None,
            draft: None,
            state: MutationState::default(),
            escape: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> MutationState {
        self.state
    }

    pub fn editor(&self) -> Option<ViewId> {
        self.editor
    }

    /// Builds a fresh form for `point`. Returns the form it replaces, which
    /// the caller must swap out and unmount.
    pub fn rebuild(&mut self, point: &Point, cx: &mut RenderCtx<'_>) -> Option<ViewId> {
        self.draft = Some(point.clone());
        self.state = MutationState::default();
        let view = cx.surface.create(self.spec(point.clone()));
        self.editor.replace(view)
    }

    /// Enters Editing and starts listening for Escape.
    pub fn enter(&mut self, cx: &mut RenderCtx<'_>) {
        let handle = cx.handle.clone();
        let target = EditorKey::Item(self.key.clone());
        self.escape = Some(Subscription::escape(cx.keys, move || {
            handle.send(Gesture::Escape(target.clone()));
        }));
        self.mode = Mode::Editing;
    }

    /// Back to Default, restoring the form to `committed`.
    pub fn leave(&mut self, committed: &Point, cx: &mut RenderCtx<'_>) {
        self.close();
        self.draft = Some(committed.clone());
        if let Some(view) = self.editor {
            cx.surface.update(view, self.spec(committed.clone()));
        }
    }

    /// Back to Default without touching the form (it is about to be dropped).
    pub fn close(&mut self) {
        self.escape = None;
        self.mode = Mode::Default;
        self.state = MutationState::default();
    }

    /// Unmounts the form and releases the listener.
    pub fn discard(&mut self, cx: &mut RenderCtx<'_>) {
        self.close();
        if let Some(view) = self.editor.take() {
            cx.surface.unmount(view);
        }
    }

    /// Records what the user submitted, so a rollback can show it again.
    pub fn set_draft(&mut self, draft: Point) {
        self.draft = Some(draft);
    }

    pub fn set_saving(&mut self, cx: &mut RenderCtx<'_>) -> bool {
        self.set_state(MutationState::saving(), cx)
    }

    pub fn set_deleting(&mut self, cx: &mut RenderCtx<'_>) -> bool {
        self.set_state(MutationState::deleting(), cx)
    }

    /// Clears every pending flag, keeps the draft and plays the failure
    /// animation on the form.
    pub fn abort(&mut self, cx: &mut RenderCtx<'_>) {
        if self.mode != Mode::Editing {
            return;
        }
        self.set_state(MutationState::default(), cx);
        if let Some(view) = self.editor {
            cx.surface.shake(view);
        }
    }

    fn set_state(&mut self, state: MutationState, cx: &mut RenderCtx<'_>) -> bool {
        if self.mode != Mode::Editing {
            return false;
        }
        let (Some(view), Some(draft)) = (self.editor, self.draft.clone()) else {
            return false;
        };
        self.state = state;
        cx.surface.update(view, self.spec(draft));
        true
    }

    fn spec(&self, point: Point) -> ViewSpec {
        ViewSpec::Editor {
            key: EditorKey::Item(self.key.clone()),
            form: EditForm {
                point,
                state: self.state,
                is_new: false,
            },
        }
    }
}
