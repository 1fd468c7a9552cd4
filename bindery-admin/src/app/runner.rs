//! Headless driver: runs the library form pipeline from the command line

use std::sync::Arc;

use anyhow::{Context, bail};
use bindery_model::{Library, LibraryId};

use crate::app::bootstrap::{AppConfig, build_api};
use crate::app::cli::{Cli, Command, LibraryArgs, TagsCommand};
use crate::domains::library::{
    FormEffect, FormServices, LibraryForm, LibraryFormMessage, LibraryPreview,
    PreviewSink, TagCatalog, load_tags,
};
use crate::domains::ui::feedback_ui::{
    FeedbackMessage, ToastManager, ToastMessages, update_feedback_ui,
};
use crate::domains::ui::navigation::{Navigator, Route};
use crate::infrastructure::ApiService;

/// Navigator for a process with no router: reports the destination
#[derive(Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, route: Route) {
        log::info!("Navigating to {}", route);
        println!("-> {}", route);
    }
}

/// Logs every preview update at debug level
#[derive(Debug, Default)]
pub struct LogPreviewSink;

impl PreviewSink for LogPreviewSink {
    fn publish(&self, preview: &LibraryPreview) {
        log::debug!(
            "Preview: {} at {} ({}, tags {:?})",
            preview.name,
            preview.path,
            preview.library_options.library_pattern,
            preview.tags
        );
    }
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let api = build_api(&config).await?;
    let toasts = ToastManager::with_auto_dismiss(config.toast_duration);
    let catalog = TagCatalog::new();
    load_tags(api.as_ref(), &catalog)
        .await
        .context("failed to load tags")?;

    match cli.command {
        Command::Tags(TagsCommand::List) => {
            for tag in catalog.tags() {
                println!("{}\t{}", tag.id, tag.name);
            }
            Ok(())
        }
        Command::Tags(TagsCommand::Create { name }) => {
            create_tag(api.as_ref(), &toasts, name).await
        }
        Command::Create(fields) => {
            let services = FormServices::new(api, toasts, catalog, Arc::new(LogNavigator))
                .with_navigation_delay(config.navigation_delay);
            run_form(services, None, &fields).await
        }
        Command::Edit { target, fields } => {
            let services = FormServices::new(api, toasts, catalog, Arc::new(LogNavigator))
                .with_navigation_delay(config.navigation_delay);
            run_form(services, Some(target), &fields).await
        }
    }
}

async fn create_tag(
    api: &dyn ApiService,
    toasts: &ToastManager,
    name: String,
) -> anyhow::Result<()> {
    let messages = ToastMessages {
        loading: "Creating tag...",
        success: "Tag created!",
        error: "Something went wrong.",
    };
    let (_, result) = toasts.track(messages, api.create_tags(vec![name])).await;
    print_toasts(toasts);
    for tag in result? {
        println!("{}\t{}", tag.id, tag.name);
    }
    Ok(())
}

fn find_library(libraries: &[Library], target: &str) -> Option<Library> {
    let by_id = target.parse::<LibraryId>().ok();
    libraries
        .iter()
        .find(|lib| Some(lib.id) == by_id || lib.name == target)
        .cloned()
}

async fn run_form(
    services: FormServices,
    target: Option<String>,
    fields: &LibraryArgs,
) -> anyhow::Result<()> {
    let libraries = services
        .api
        .fetch_libraries()
        .await
        .context("failed to load libraries")?;

    let editing = match target {
        Some(target) => match find_library(&libraries, &target) {
            Some(library) => Some(library),
            None => bail!("no library matches {target:?}"),
        },
        None => None,
    };

    let toasts = services.toasts.clone();
    let mut form = LibraryForm::new(services, libraries, editing);
    let _preview = form.subscribe_preview(Arc::new(LogPreviewSink));
    let route = match form.editing() {
        Some(library) => Route::ManageLibrary(library.id),
        None => Route::CreateLibrary,
    };
    log::info!("{} form ready at {}", form.submit_label(), route);

    for message in fields.messages() {
        form.update(message);
    }

    let Some(FormEffect::Submit(pending)) = form.update(LibraryFormMessage::Submit)
    else {
        for (field, error) in form.errors().iter() {
            eprintln!("{field}: {error}");
        }
        bail!("the form has {} invalid field(s)", form.errors().len());
    };

    let result = pending.run().await;
    print_toasts(&toasts);
    let library = form.finish_submit(result)?;
    println!("{}\t{}\t{}", library.id, library.name, library.path);

    if let Some(navigation) = form.take_pending_navigation() {
        navigation.finished().await;
    }
    update_feedback_ui(&toasts, FeedbackMessage::ClearToasts);
    Ok(())
}

fn print_toasts(toasts: &ToastManager) {
    for toast in toasts.history() {
        println!("[{:?}] {}", toast.level, toast.message);
    }
}
