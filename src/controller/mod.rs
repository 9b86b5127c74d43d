//! The tag-aware input controller.
//!
//! Watches the input text, decides whether the user is naming an item or
//! tagging a category, keeps one selection cursor over whichever candidate
//! list is active, and turns confirms into category changes, item upserts or
//! mark toggles.

pub mod candidates;
pub mod cursor;
pub mod pointer;
pub mod queue;
pub mod view;

use std::collections::HashSet;

use crate::io::store::Store;
use crate::model::{Category, CategoryId, InputConfig, Item, ItemId};
use crate::ops::filter::{filter_categories, filter_suggestions};
use crate::ops::upsert::{Upsert, toggle_mark, upsert_item};
use crate::parse::{InputState, TriggerParser};

pub use candidates::{CandidateSource, Candidates, Selection};
pub use cursor::{NO_SELECTION, ScrollTarget, SelectionCursor};
pub use pointer::{HoverGate, PointerVisibility};
pub use queue::{Ack, CommandQueue, Signal};
pub use view::{ViewAction, ViewMode};

/// Observable outcome of a controller step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    ModeChanged(ViewMode),
    CursorMoved { index: isize, mode: ViewMode },
    CategorySelected(CategoryId),
    ItemCreated(ItemId),
    ItemReused { id: ItemId, from: usize },
    MarkToggled { id: ItemId, marked: bool },
    /// A confirm or commit that had nothing to act on
    Ignored,
}

/// Owns the category and item sequences and all interaction state.
///
/// Single writer: only the commit path mutates `categories`/`items`, and
/// every mutation is written through `store` before the call returns.
pub struct Controller<S: Store, P: PointerVisibility> {
    store: S,
    pointer: P,
    parser: TriggerParser,
    suggestion_limit: usize,

    categories: Vec<Category>,
    items: Vec<Item>,
    active_category: Option<CategoryId>,
    marked: HashSet<ItemId>,

    mode: ViewMode,
    input: InputState,
    filtered_categories: Vec<Category>,
    suggestions: Vec<Item>,
    cursor: SelectionCursor,
    scroll: Option<ScrollTarget>,
    queue: CommandQueue,
}

impl<S: Store, P: PointerVisibility> Controller<S, P> {
    /// Load both sequences from `store`; the first category starts active.
    pub fn new(mut store: S, pointer: P, config: &InputConfig) -> Self {
        let categories = store.load_categories();
        let items = store.load_items();
        let active_category = categories.first().map(|c| c.id.clone());
        tracing::debug!(
            categories = categories.len(),
            items = items.len(),
            "controller loaded"
        );

        let mut controller = Controller {
            store,
            pointer,
            parser: TriggerParser::new(config.trigger),
            suggestion_limit: config.suggestion_limit,
            categories,
            items,
            active_category,
            marked: HashSet::new(),
            mode: ViewMode::MainList,
            input: InputState::default(),
            filtered_categories: Vec::new(),
            suggestions: Vec::new(),
            cursor: SelectionCursor::default(),
            scroll: None,
            queue: CommandQueue::default(),
        };
        controller.recompute();
        controller
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn pointer(&self) -> &P {
        &self.pointer
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn text(&self) -> &str {
        &self.input.raw_text
    }

    pub fn trigger(&self) -> char {
        self.parser.trigger()
    }

    pub fn cursor(&self) -> SelectionCursor {
        self.cursor
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn suggestions(&self) -> &[Item] {
        &self.suggestions
    }

    pub fn filtered_categories(&self) -> &[Category] {
        &self.filtered_categories
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    pub fn active_category(&self) -> Option<&Category> {
        self.active_category.as_ref().and_then(|id| self.category(id))
    }

    pub fn is_marked(&self, id: &ItemId) -> bool {
        self.marked.contains(id)
    }

    pub fn marked_count(&self) -> usize {
        self.marked.len()
    }

    /// Whether category tagging drives the candidate list right now
    pub fn is_tagging(&self) -> bool {
        self.mode == ViewMode::InputSuggest && self.input.is_tag_active
    }

    pub fn candidate_source(&self) -> CandidateSource {
        match self.mode {
            ViewMode::MainList => CandidateSource::Items,
            ViewMode::CategoryPicker => CandidateSource::AllCategories,
            ViewMode::InputSuggest if self.input.is_tag_active => {
                CandidateSource::TaggedCategories
            }
            ViewMode::InputSuggest => CandidateSource::Suggestions,
        }
    }

    /// The list the cursor currently indexes
    pub fn candidates(&self) -> Candidates<'_> {
        match self.candidate_source() {
            CandidateSource::Items => Candidates::Items(&self.items),
            CandidateSource::AllCategories => Candidates::Categories(&self.categories),
            CandidateSource::TaggedCategories => Candidates::Categories(&self.filtered_categories),
            CandidateSource::Suggestions => Candidates::Items(&self.suggestions),
        }
    }

    /// Row to highlight in the list shown for `mode`, if the cursor belongs
    /// to that mode.
    pub fn highlighted(&self, mode: ViewMode) -> Option<usize> {
        if mode != self.mode || !self.cursor.is_current(mode) {
            return None;
        }
        self.cursor.selected()
    }

    /// Pending scroll request for the list shown in `mode`. Requests issued
    /// for another mode are stale and yield `None`.
    pub fn scroll_target_for(&self, mode: ViewMode) -> Option<usize> {
        self.scroll
            .filter(|t| t.mode == mode && mode == self.mode)
            .map(|t| t.index)
    }

    pub fn pending_signals(&self) -> usize {
        self.queue.len()
    }

    // -----------------------------------------------------------------------
    // Text input
    // -----------------------------------------------------------------------

    /// Replace the input text; reclassifies, refilters and resets the cursor.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.input = self.parser.parse(&text.into());
        self.recompute();
    }

    /// Refilter both candidate lists and put the cursor back at rest. Every
    /// list change goes through here, so the reset also keeps the cursor in
    /// range of the new list; a scroll request from before is replaced by
    /// one for the reset position, or dropped.
    fn recompute(&mut self) {
        let tag_query = if self.input.is_tag_active {
            self.input.tag_query.as_str()
        } else {
            ""
        };
        self.filtered_categories = filter_categories(tag_query, &self.categories);
        self.suggestions = filter_suggestions(
            self.input.suggestion_query(),
            &self.items,
            self.suggestion_limit,
        );
        let count = self.candidates().len();
        let tagging = self.is_tagging();
        self.cursor.reset(self.mode, tagging, count);
        self.scroll = self.cursor.selected().map(|index| ScrollTarget {
            index,
            mode: self.mode,
        });
    }

    // -----------------------------------------------------------------------
    // Mode transitions
    // -----------------------------------------------------------------------

    pub fn apply(&mut self, action: ViewAction) -> Vec<ControllerEvent> {
        let next = self.mode.transition(action);
        if next == self.mode {
            return Vec::new();
        }

        // Leaving the input without committing discards what was typed
        if self.mode == ViewMode::InputSuggest
            && matches!(action, ViewAction::Dismiss | ViewAction::BackgroundTap)
        {
            self.input = self.parser.parse("");
        }

        tracing::debug!(from = self.mode.label(), to = next.label(), "mode change");
        self.mode = next;
        self.recompute();
        vec![ControllerEvent::ModeChanged(next)]
    }

    // -----------------------------------------------------------------------
    // Keyboard
    // -----------------------------------------------------------------------

    /// Accept a signal from the key source. The state change happens on the
    /// next [`drain`](Self::drain), never inside this call.
    pub fn handle_signal(&mut self, signal: Signal) -> Ack {
        self.queue.push(signal)
    }

    /// Apply every queued signal, oldest first. Call once per event-loop
    /// iteration, after the triggering event has been dispatched.
    pub fn drain(&mut self) -> Vec<ControllerEvent> {
        let mut events = Vec::new();
        for signal in self.queue.take() {
            match signal {
                Signal::MoveUp => events.extend(self.move_cursor(Signal::MoveUp)),
                Signal::MoveDown => events.extend(self.move_cursor(Signal::MoveDown)),
                Signal::Confirm => events.extend(self.confirm()),
            }
        }
        events
    }

    fn move_cursor(&mut self, direction: Signal) -> Option<ControllerEvent> {
        let count = self.candidates().len();
        let before = self.cursor.index();
        match direction {
            Signal::MoveUp => self.cursor.move_up(count),
            _ => self.cursor.move_down(count),
        }
        self.pointer.hide();

        let index = self.cursor.index();
        if let Some(row) = self.cursor.selected() {
            self.scroll = Some(ScrollTarget {
                index: row,
                mode: self.mode,
            });
        }
        (index != before).then_some(ControllerEvent::CursorMoved {
            index,
            mode: self.mode,
        })
    }

    /// Resolve the highlighted row (or the typed text) and commit it.
    pub fn confirm(&mut self) -> Vec<ControllerEvent> {
        let highlighted = self
            .cursor
            .selected()
            .filter(|_| self.cursor.is_current(self.mode))
            .and_then(|i| self.candidates().selection_at(i));

        let selection = match (self.candidate_source(), highlighted) {
            (_, Some(selection)) => selection,
            (CandidateSource::Suggestions, None) => Selection::RawText(self.input.raw_text.clone()),
            (_, None) => {
                tracing::debug!(
                    mode = self.mode.label(),
                    index = self.cursor.index(),
                    "confirm with nothing selected"
                );
                return vec![ControllerEvent::Ignored];
            }
        };
        self.commit(selection)
    }

    // -----------------------------------------------------------------------
    // Pointer
    // -----------------------------------------------------------------------

    /// Raw pointer movement: hover takes over from the keyboard again.
    pub fn pointer_moved(&mut self) {
        self.pointer.show();
    }

    /// Pointer entered (`entered == true`) or left row `index` of the list
    /// shown for `mode`. Ignored while the keyboard owns the highlight or
    /// when the list is not the active one.
    pub fn hover(&mut self, index: usize, mode: ViewMode, entered: bool) {
        if mode != self.mode || !self.pointer.is_visible() {
            return;
        }
        if entered {
            let count = self.candidates().len();
            self.cursor.set(index, count);
        } else if self.cursor.selected() == Some(index) {
            self.cursor.clear();
        }
    }

    // -----------------------------------------------------------------------
    // Commit / upsert
    // -----------------------------------------------------------------------

    /// Finalize `selection` according to the current mode. Selections that
    /// don't fit the mode, an unknown category, blank text or a missing
    /// active category are no-ops.
    pub fn commit(&mut self, selection: Selection) -> Vec<ControllerEvent> {
        match (self.mode, selection) {
            (ViewMode::CategoryPicker, Selection::Category(category)) => {
                self.commit_category(category)
            }
            (ViewMode::InputSuggest, Selection::Category(category)) if self.input.is_tag_active => {
                self.commit_category(category)
            }
            (ViewMode::InputSuggest, Selection::Item(item)) if !self.input.is_tag_active => {
                self.commit_item(item)
            }
            (ViewMode::InputSuggest, Selection::RawText(text)) if !self.input.is_tag_active => {
                let name = text.trim();
                let Some(category) = self.active_category.clone() else {
                    tracing::debug!("commit without an active category");
                    return vec![ControllerEvent::Ignored];
                };
                if name.is_empty() {
                    return vec![ControllerEvent::Ignored];
                }
                self.commit_item(Item::new(name, category))
            }
            (ViewMode::MainList, Selection::Item(item)) => {
                if !self.items.iter().any(|i| i.id == item.id) {
                    return vec![ControllerEvent::Ignored];
                }
                let marked = toggle_mark(&mut self.marked, &item.id);
                vec![ControllerEvent::MarkToggled {
                    id: item.id,
                    marked,
                }]
            }
            (mode, selection) => {
                tracing::debug!(mode = mode.label(), ?selection, "selection does not fit mode");
                vec![ControllerEvent::Ignored]
            }
        }
    }

    fn commit_category(&mut self, category: Category) -> Vec<ControllerEvent> {
        if self.category(&category.id).is_none() {
            return vec![ControllerEvent::Ignored];
        }
        tracing::info!(category = %category.id, "category selected");
        self.active_category = Some(category.id.clone());

        if self.input.is_tag_active {
            let stripped = self.parser.strip_tag(&self.input.raw_text);
            self.input = self.parser.parse(&stripped);
        }

        let mut events = vec![ControllerEvent::CategorySelected(category.id)];
        events.extend(self.apply(ViewAction::Committed));
        events
    }

    fn commit_item(&mut self, item: Item) -> Vec<ControllerEvent> {
        let id = item.id.clone();
        let category = item.category.clone();
        let outcome = upsert_item(&mut self.items, item);
        self.active_category = Some(category);

        if let Err(e) = self.store.save_items(&self.items) {
            tracing::warn!(error = %e, "could not save items");
        }

        let mut events = vec![match outcome {
            Upsert::Created => {
                tracing::info!(item = %id, "item created");
                ControllerEvent::ItemCreated(id)
            }
            Upsert::Moved { from } => {
                tracing::info!(item = %id, from, "item reused");
                ControllerEvent::ItemReused { id, from }
            }
        }];

        self.input = self.parser.parse("");
        events.extend(self.apply(ViewAction::Committed));
        events
    }
}
