//! Creation Presenter
//!
//! The form for a point that does not exist yet. It is either absent or
//! mounted at the top of the list; while mounted the create trigger is off.

use crate::escape::Subscription;
use crate::models::{MutationState, Point};
use crate::surface::{Container, EditForm, Position, ViewId, ViewSpec};

use super::{CreationKey, EditorKey, Gesture, RenderCtx};

#[derive(Debug, Default)]
pub struct CreationPresenter {
    key: Option<CreationKey>,
    editor: Option<ViewId>,
    draft: Option<Point>,
    state: MutationState,
    escape: Option<Subscription>,
    opened: u64,
}

impl CreationPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.editor.is_some()
    }

    pub fn key(&self) -> Option<CreationKey> {
        self.key
    }

    pub fn state(&self) -> MutationState {
        self.state
    }

    pub fn editor(&self) -> Option<ViewId> {
        self.editor
    }

    /// Mounts a form seeded with `blank` and disables the create trigger.
    pub fn init(&mut self, blank: Point, cx: &mut RenderCtx<'_>) {
        if self.is_active() {
            return;
        }
        self.opened += 1;
        let key = CreationKey(self.opened);
        self.key = Some(key);
        self.state = MutationState::default();
        self.draft = Some(blank.clone());

        let view = cx.surface.create(self.spec(key, blank));
        cx.surface.mount(view, Container::List, Position::AfterBegin);
        cx.surface.set_create_enabled(false);
        self.editor = Some(view);

        let handle = cx.handle.clone();
        self.escape = Some(Subscription::escape(cx.keys, move || {
            handle.send(Gesture::Escape(EditorKey::Creation(key)));
        }));
    }

    /// Unmounts the form and re-enables the create trigger. Returns whether
    /// a form was open; calling it again is a no-op.
    pub fn destroy(&mut self, cx: &mut RenderCtx<'_>) -> bool {
        let Some(view) = self.editor.take() else {
            return false;
        };
        self.escape = None;
        self.key = None;
        self.draft = None;
        self.state = MutationState::default();
        cx.surface.unmount(view);
        if !cx.create_locked {
            cx.surface.set_create_enabled(true);
        }
        true
    }

    pub fn set_draft(&mut self, draft: Point) {
        if self.is_active() {
            self.draft = Some(draft);
        }
    }

    pub fn set_saving(&mut self, cx: &mut RenderCtx<'_>) {
        self.set_state(MutationState::saving(), cx);
    }

    /// Keeps the form open with the user's input and shakes it.
    pub fn set_aborting(&mut self, cx: &mut RenderCtx<'_>) {
        if self.set_state(MutationState::default(), cx) {
            if let Some(view) = self.editor {
                cx.surface.shake(view);
            }
        }
    }

    fn set_state(&mut self, state: MutationState, cx: &mut RenderCtx<'_>) -> bool {
        let (Some(view), Some(key), Some(draft)) = (self.editor, self.key, self.draft.clone()) else {
            return false;
        };
        self.state = state;
        cx.surface.update(view, self.spec(key, draft));
        true
    }

    fn spec(&self, key: CreationKey, point: Point) -> ViewSpec {
        ViewSpec::Editor {
            key: EditorKey::Creation(key),
            form: EditForm {
                point,
                state: self.state,
                is_new: true,
            },
        }
    }
}
