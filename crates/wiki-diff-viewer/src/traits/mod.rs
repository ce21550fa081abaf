//! Collaborators injected into the diff viewer.

mod article_details;
mod date_formatter;
mod localizer;

pub use article_details::{ArticleDetailsProvider, DetailsError, EditorsRequest, WikiEditorsProvider};
pub use date_formatter::{ChronoDateFormatter, DateFormatter};
pub use localizer::{EnglishLocalizer, Localizer};
