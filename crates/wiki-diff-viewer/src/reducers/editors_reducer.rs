use crate::actions::ArticleDetailsAction;
use crate::state::EditorsState;

/// Reducer for the article's editors
pub fn reduce(editors: EditorsState, action: &ArticleDetailsAction) -> EditorsState {
    match action {
        ArticleDetailsAction::Requested => match editors {
            EditorsState::Missing => EditorsState::Requested,
            other => other,
        },
        ArticleDetailsAction::EditorsLoaded(names) => match editors {
            EditorsState::Ready(existing) => {
                log::debug!("Editors already known, ignoring late lookup result");
                EditorsState::Ready(existing)
            }
            _ => {
                log::debug!("Editors loaded: {} names", names.len());
                EditorsState::Ready(names.clone())
            }
        },
    }
}
