use crate::actions::SelectionAction;
use crate::state::SelectionIndex;

/// Reducer for the selection index
///
/// Only `SetSelectedIndex` writes; navigation actions are translated by the
/// selection middleware before they get here.
pub fn reduce(selection: SelectionIndex, action: &SelectionAction, len: usize) -> SelectionIndex {
    match action {
        SelectionAction::SetSelectedIndex(next) => match next.index() {
            Some(index) if index >= len => {
                log::warn!("Ignoring selection of index {} in a list of {}", index, len);
                selection
            }
            _ => {
                log::debug!("Selection: {:?} -> {:?}", selection, next);
                *next
            }
        },
        _ => selection,
    }
}
