/// The three mutually exclusive interaction modes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// The todo list itself
    #[default]
    MainList,
    /// Picking the active category from the full list
    CategoryPicker,
    /// The text input is focused; suggestions or tagged categories show
    InputSuggest,
}

/// Things that move the controller between modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    /// Header activation
    OpenCategoryPicker,
    /// The text input gained focus
    FocusInput,
    /// Activation outside any list
    BackgroundTap,
    /// Explicit dismiss (Esc)
    Dismiss,
    /// A commit finished
    Committed,
}

impl ViewMode {
    /// Next mode after `action`. Unlisted pairs leave the mode unchanged.
    pub fn transition(self, action: ViewAction) -> ViewMode {
        use ViewAction::*;
        use ViewMode::*;
        match (self, action) {
            (MainList, OpenCategoryPicker) => CategoryPicker,
            (MainList | CategoryPicker, FocusInput) => InputSuggest,
            (CategoryPicker | InputSuggest, BackgroundTap | Dismiss | Committed) => MainList,
            (mode, _) => mode,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::MainList => "list",
            ViewMode::CategoryPicker => "categories",
            ViewMode::InputSuggest => "input",
        }
    }
}
