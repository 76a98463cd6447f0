//! Item Presenter
//!
//! One list item: a card showing the committed point, and an edit session
//! whose form replaces the card while the item is being edited.

use crate::models::{Mode, MutationState, Point};
use crate::surface::{Container, Position, ViewId, ViewSpec};

use super::{ItemEditSession, ItemKey, RenderCtx};

#[derive(Debug)]
pub struct ItemPresenter {
    key: ItemKey,
    point: Option<Point>,
    card: Option<ViewId>,
    session: ItemEditSession,
}

impl ItemPresenter {
    pub fn new(key: ItemKey) -> Self {
        Self {
            session: ItemEditSession::new(key.clone()),
            key,
            point: None,
            card: None,
        }
    }

    pub fn key(&self) -> &ItemKey {
        &self.key
    }

    /// Last committed snapshot
    pub fn point(&self) -> Option<&Point> {
        self.point.as_ref()
    }

    pub fn mode(&self) -> Mode {
        self.session.mode()
    }

    pub fn state(&self) -> MutationState {
        self.session.state()
    }

    pub fn card(&self) -> Option<ViewId> {
        self.card
    }

    pub fn session(&self) -> &ItemEditSession {
        &self.session
    }

    /// (Re)builds card and form from `point`.
    ///
    /// The first call mounts the card at the end of the list. Later calls put
    /// the new card where the old card or form was; an open form is closed,
    /// so a confirmed refresh always wins over unsaved edits.
    pub fn init(&mut self, point: Point, cx: &mut RenderCtx<'_>) {
        let card = cx.surface.create(ViewSpec::Card {
            key: self.key.clone(),
            point: point.clone(),
        });
        let prev_card = self.card.replace(card);
        let prev_editor = self.session.rebuild(&point, cx);
        self.point = Some(point);

        let (Some(prev_card), Some(prev_editor)) = (prev_card, prev_editor) else {
            cx.surface.mount(card, Container::List, Position::BeforeEnd);
            return;
        };

        match self.session.mode() {
            Mode::Default => cx.surface.swap(card, prev_card),
            Mode::Editing => {
                log::debug!("[BOARD] Refresh of {} closes its open editor", self.key.id);
                cx.surface.swap(card, prev_editor);
                self.session.close();
            }
        }

        cx.surface.unmount(prev_card);
        cx.surface.unmount(prev_editor);
    }

    /// Unmounts both views and releases the Escape listener. Idempotent.
    pub fn destroy(&mut self, cx: &mut RenderCtx<'_>) {
        if let Some(card) = self.card.take() {
            cx.surface.unmount(card);
        }
        self.session.discard(cx);
    }

    /// Discards unsaved edits and shows the card again. No-op unless editing.
    pub fn reset_view(&mut self, cx: &mut RenderCtx<'_>) {
        if self.session.mode() != Mode::Editing {
            return;
        }
        let (Some(point), Some(card), Some(editor)) =
            (self.point.as_ref(), self.card, self.session.editor())
        else {
            return;
        };
        self.session.leave(point, cx);
        cx.surface.swap(card, editor);
    }

    /// Replaces the card with the form. Callers reset every other item first.
    pub fn open_editor(&mut self, cx: &mut RenderCtx<'_>) {
        if self.session.mode() == Mode::Editing {
            return;
        }
        let (Some(card), Some(editor)) = (self.card, self.session.editor()) else {
            return;
        };
        cx.surface.swap(editor, card);
        self.session.enter(cx);
    }

    pub fn set_draft(&mut self, draft: Point) {
        self.session.set_draft(draft);
    }

    /// Marks the open form busy while a commit is in flight.
    pub fn set_saving(&mut self, cx: &mut RenderCtx<'_>) {
        self.session.set_saving(cx);
    }

    /// Marks the open form busy with a deletion in flight.
    pub fn set_deleting(&mut self, cx: &mut RenderCtx<'_>) {
        self.session.set_deleting(cx);
    }

    /// Rollback after a failed mutation: shakes the card, or clears the
    /// form's flags and shakes the form with the user's edits left in place.
    pub fn set_aborting(&mut self, cx: &mut RenderCtx<'_>) {
        match self.session.mode() {
            Mode::Default => {
                if let Some(card) = self.card {
                    cx.surface.shake(card);
                }
            }
            Mode::Editing => self.session.abort(cx),
        }
    }
}
