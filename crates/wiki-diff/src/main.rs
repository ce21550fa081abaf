use anyhow::{bail, Context};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use wiki_client::{Article, ReqwestWikiClient, RevisionRef, WikiClient, WikiId, WikimediaDomains};
use wiki_diff_config::{AppConfig, ParentResolution};
use wiki_diff_viewer::middleware::{
    ArticleDetailsMiddleware, DiffFetchMiddleware, LoggingMiddleware, SelectionMiddleware,
};
use wiki_diff_viewer::traits::{ChronoDateFormatter, EnglishLocalizer, WikiEditorsProvider};
use wiki_diff_viewer::view_models::{DiffBodyView, DiffPanelViewModel, PresentationContext};
use wiki_diff_viewer::{Action, AppState, DiffEntry, FetchPhase, Store};

mod logger;

/// Show the diff of a wiki revision, or of a range of revisions
#[derive(Parser, Debug)]
#[command(name = "wiki-diff", version)]
struct Args {
    /// Page the revisions belong to
    #[arg(long)]
    page_id: u64,

    /// Revisions listed, one entry each
    #[arg(long = "revid", required = true, num_args = 1..)]
    revids: Vec<u64>,

    /// Entry to expand
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Start of a range ending at the expanded entry's revision
    #[arg(long)]
    first_revid: Option<u64>,

    /// Parent of --first-revid
    #[arg(long, requires = "first_revid")]
    first_parentid: Option<u64>,

    /// Wiki of the article, e.g. "en.wikipedia" [default: from config]
    #[arg(long)]
    wiki: Option<WikiId>,

    /// Article title shown in the panel header
    #[arg(long, default_value = "")]
    title: String,

    /// Comma separated editors; looked up on the wiki when omitted
    #[arg(long, value_delimiter = ',')]
    editors: Option<Vec<String>>,

    /// Request the predecessor diff first and resolve the range parent afterwards
    #[arg(long)]
    deferred_parent: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let log_file = logger::init()?;

    log::info!("Starting wiki-diff, logging to {}", log_file.display());

    let mut config = AppConfig::load();
    if args.deferred_parent {
        config.parent_resolution = ParentResolution::Deferred;
    }

    let result = run(&args, &config);

    if let Err(ref e) = result {
        log::error!("wiki-diff failed: {:#}", e);
    }
    log::info!("Exiting wiki-diff");
    result
}

fn run(args: &Args, config: &AppConfig) -> anyhow::Result<()> {
    if args.index >= args.revids.len() {
        bail!(
            "--index {} is out of range for {} revisions",
            args.index,
            args.revids.len()
        );
    }

    let wiki = match &args.wiki {
        Some(wiki) => wiki.clone(),
        None => config
            .default_wiki
            .parse()
            .with_context(|| format!("Invalid default_wiki '{}' in config", config.default_wiki))?,
    };
    let article = Article {
        title: args.title.clone(),
        wiki,
    };

    let entries = args
        .revids
        .iter()
        .enumerate()
        .map(|(index, revid)| {
            let entry = DiffEntry::new(RevisionRef::new(*revid, args.page_id));
            match args.first_revid {
                Some(first_revid) if index == args.index => {
                    let mut first = RevisionRef::new(first_revid, args.page_id);
                    if let Some(parent) = args.first_parentid {
                        first = first.with_parent(parent);
                    }
                    entry.with_first_revision(first)
                }
                _ => entry,
            }
        })
        .collect();

    let resolver = WikimediaDomains::with_overrides(config.host_overrides.clone());
    let state = AppState::new(article, entries, args.editors.clone(), config, &resolver);

    let runtime = Runtime::new().context("Failed to create tokio runtime")?;
    let client: Arc<dyn WikiClient> = Arc::new(ReqwestWikiClient::new(&config.user_agent)?);

    let mut store = Store::new(state);

    // Add middleware in order (they execute in this order)
    store.add_middleware(Box::new(LoggingMiddleware::new()));
    store.add_middleware(Box::new(SelectionMiddleware::new()));
    store.add_middleware(Box::new(ArticleDetailsMiddleware::new(
        runtime.handle().clone(),
        Arc::new(WikiEditorsProvider::new(Arc::clone(&client))),
    )));
    store.add_middleware(Box::new(DiffFetchMiddleware::new(
        runtime.handle().clone(),
        client,
    )));

    let index = args.index;
    store.dispatch(Action::show(index));
    let settled = store.run_until(Duration::from_secs(config.wait_timeout_secs), |state| {
        matches!(
            state.viewers[index].fetch.phase(),
            FetchPhase::Fetched | FetchPhase::Failed
        )
    });
    if !settled {
        log::warn!("Diff for entry {} did not arrive in time", index);
    }

    print_panel(store.state(), index);

    store.dispatch(Action::Teardown);
    if !settled {
        bail!("Timed out after {}s waiting for the diff", config.wait_timeout_secs);
    }
    Ok(())
}

fn print_panel(state: &AppState, index: usize) {
    let i18n = EnglishLocalizer::new();
    let dates = ChronoDateFormatter::default();
    let ctx = PresentationContext {
        localizer: &i18n,
        dates: &dates,
    };

    let Some(model) = DiffPanelViewModel::build(state, index, ctx) else {
        return;
    };

    match model {
        DiffPanelViewModel::Collapsed(collapsed) => println!("[{}]", collapsed.label),
        DiffPanelViewModel::Expanded(panel) => {
            if !panel.article_title.is_empty() {
                println!("{}", panel.article_title);
            }
            println!("{}: {}", panel.view_on_wiki.label, panel.view_on_wiki.url);
            println!("{}", panel.legend.edits_by);
            if let Some(date_line) = &panel.legend.date_line {
                println!("{}", date_line);
            }
            if let Some(characters) = &panel.legend.characters {
                println!("{}", characters);
            }
            if let Some(comment) = &panel.comment {
                println!("{}", comment);
            }
            println!();
            match &panel.body {
                DiffBodyView::Loading => println!("..."),
                DiffBodyView::Empty { placeholder } => println!("{}", placeholder),
                DiffBodyView::Markup(diff) => println!("{}", diff.as_trusted_markup()),
                DiffBodyView::Failed { message, .. } => eprintln!("{}", message),
            }
        }
    }
}
