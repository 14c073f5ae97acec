// SPDX-License-Identifier: MPL-2.0
//! View description of the detail modal.

use super::format::{format_dimensions, format_file_size, format_percent, format_timestamp};
use super::gallery_view::toggle_label;
use super::json_tree::JsonTree;
use super::OptionView;
use crate::i18n::fluent::I18n;
use crate::metadata::PromptEntry;
use crate::modal::ModalTab;
use crate::search::SearchResult;
use serde::Serialize;

/// Metadata of the item shown in the modal, as far as it has arrived.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataPanel {
    Loading,
    Loaded {
        prompts: Vec<PromptEntry>,
        workflow: Option<JsonTree>,
        api: Option<JsonTree>,
    },
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub result: &'a SearchResult,
    pub index: usize,
    pub total: usize,
    pub tab: ModalTab,
    pub selected: bool,
    pub base_url: &'a str,
    pub metadata: &'a MetadataPanel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModalView {
    pub index: usize,
    pub total: usize,
    pub position: String,
    pub path: String,
    pub filename: String,
    pub url: String,
    pub selected: bool,
    pub toggle_label: String,
    pub has_previous: bool,
    pub has_next: bool,
    pub tabs: Vec<OptionView<ModalTab>>,
    pub content: TabContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptView {
    pub heading: String,
    pub input_name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Panel<T> {
    Loading { message: String },
    Empty { message: String },
    Ready { content: T },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "tab", rename_all = "snake_case")]
pub enum TabContent {
    Metrics { rows: Vec<MetricRow> },
    Prompts { panel: Panel<Vec<PromptView>> },
    Workflow { panel: Panel<JsonTree> },
    Api { panel: Panel<JsonTree> },
}

pub fn view(ctx: ViewContext<'_>) -> ModalView {
    let ViewContext {
        i18n,
        result,
        index,
        total,
        tab,
        selected,
        base_url,
        metadata,
    } = ctx;
    let location = result.location();
    let position = (index + 1).to_string();
    let count = total.to_string();

    ModalView {
        index,
        total,
        position: i18n.tr_with_args(
            "modal-position",
            &[("position", position.as_str()), ("total", count.as_str())],
        ),
        path: result.path.clone(),
        url: location.view_url(base_url),
        filename: location.filename,
        selected,
        toggle_label: toggle_label(i18n, selected),
        has_previous: index > 0,
        has_next: index + 1 < total,
        tabs: ModalTab::ALL
            .iter()
            .map(|t| OptionView {
                value: *t,
                label: i18n.tr(t.i18n_key()),
                active: *t == tab,
            })
            .collect(),
        content: content(i18n, result, tab, metadata),
    }
}

fn content(i18n: &I18n, result: &SearchResult, tab: ModalTab, metadata: &MetadataPanel) -> TabContent {
    match tab {
        ModalTab::Metrics => TabContent::Metrics {
            rows: metric_rows(i18n, result),
        },
        ModalTab::Prompts => TabContent::Prompts {
            panel: match metadata {
                MetadataPanel::Loading => loading(i18n),
                MetadataPanel::Loaded { prompts, .. } if prompts.is_empty() => Panel::Empty {
                    message: i18n.tr("no-prompts-found"),
                },
                MetadataPanel::Loaded { prompts, .. } => Panel::Ready {
                    content: prompts.iter().map(prompt_view).collect(),
                },
            },
        },
        ModalTab::Workflow => TabContent::Workflow {
            panel: tree_panel(i18n, metadata, ModalTab::Workflow),
        },
        ModalTab::Api => TabContent::Api {
            panel: tree_panel(i18n, metadata, ModalTab::Api),
        },
    }
}

fn loading<T>(i18n: &I18n) -> Panel<T> {
    Panel::Loading {
        message: i18n.tr("loading"),
    }
}

fn tree_panel(i18n: &I18n, metadata: &MetadataPanel, tab: ModalTab) -> Panel<JsonTree> {
    let MetadataPanel::Loaded { workflow, api, .. } = metadata else {
        return loading(i18n);
    };
    let (tree, empty_key) = match tab {
        ModalTab::Api => (api, "no-prompt-found"),
        _ => (workflow, "no-workflow-found"),
    };
    match tree {
        Some(tree) => Panel::Ready {
            content: tree.clone(),
        },
        None => Panel::Empty {
            message: i18n.tr(empty_key),
        },
    }
}

fn prompt_view(entry: &PromptEntry) -> PromptView {
    PromptView {
        heading: if entry.class_type.is_empty() {
            format!("#{}", entry.node_id)
        } else {
            format!("{} #{}", entry.class_type, entry.node_id)
        },
        input_name: entry.input_name.clone(),
        value: entry.value.clone(),
    }
}

fn metric_rows(i18n: &I18n, result: &SearchResult) -> Vec<MetricRow> {
    let location = result.location();
    let mut rows = Vec::new();
    let mut push = |key: &str, value: Option<String>| {
        if let Some(value) = value {
            rows.push(MetricRow {
                label: i18n.tr(key),
                value,
            });
        }
    };

    push("metric-similarity", result.similarity.map(format_percent));
    push("metric-dimensions", format_dimensions(result.width, result.height));
    push("metric-file-size", result.file_size.map(format_file_size));
    push("metric-format", result.format.clone());
    push("metric-mode", result.mode.clone());
    push("metric-brightness", result.brightness.map(format_percent));
    push(
        "metric-tone",
        result
            .is_dark
            .map(|dark| i18n.tr(if dark { "filter-dark" } else { "filter-light" })),
    );
    push(
        "metric-workflow",
        Some(i18n.tr(if result.has_workflow { "yes" } else { "no" })),
    );
    push("metric-modified", result.modified_time.and_then(format_timestamp));
    push("metric-location", Some(location.image_type.to_string()));
    push(
        "metric-subfolder",
        Some(location.subfolder).filter(|s| !s.is_empty()),
    );
    push("metric-path", Some(result.path.clone()));
    push("metric-error", result.error.clone());
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::ui::json_tree::RenderOptions;
    use serde_json::json;

    fn i18n() -> I18n {
        I18n::new(Some("en-US".to_string()), &Config::default())
    }

    fn render(tab: ModalTab, metadata: &MetadataPanel, index: usize, total: usize) -> ModalView {
        let i18n = i18n();
        let mut result = SearchResult::new("/c/output/sub/cat.png");
        result.similarity = Some(0.5);
        result.file_size = Some(2048);
        view(ViewContext {
            i18n: &i18n,
            result: &result,
            index,
            total,
            tab,
            selected: false,
            base_url: "http://h",
            metadata,
        })
    }

    #[test]
    fn metrics_tab_lists_known_values() {
        let view = render(ModalTab::Metrics, &MetadataPanel::Loading, 0, 3);
        assert_eq!(view.position, "1 / 3");
        assert!(!view.has_previous);
        assert!(view.has_next);
        assert_eq!(view.toggle_label, "Select");
        let TabContent::Metrics { rows } = view.content else {
            panic!("metrics expected");
        };
        let labels: Vec<&str> = rows.iter().map(|r| r.value.as_str()).collect();
        assert!(labels.contains(&"50.0%"));
        assert!(labels.contains(&"2.0 KB"));
        assert!(labels.contains(&"sub"));
    }

    #[test]
    fn prompts_tab_shows_explicit_empty_state() {
        let loaded = MetadataPanel::Loaded {
            prompts: Vec::new(),
            workflow: None,
            api: None,
        };
        let view = render(ModalTab::Prompts, &loaded, 2, 3);
        assert!(!view.has_next);
        match view.content {
            TabContent::Prompts {
                panel: Panel::Empty { message },
            } => assert_eq!(message, "No prompts found"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn tree_tabs_wait_for_metadata() {
        let view = render(ModalTab::Workflow, &MetadataPanel::Loading, 0, 1);
        assert!(matches!(
            view.content,
            TabContent::Workflow {
                panel: Panel::Loading { .. }
            }
        ));
    }

    #[test]
    fn api_tab_shows_prompt_tree() {
        let i18n = i18n();
        let prompt = json!({"1": {"inputs": {}}});
        let loaded = MetadataPanel::Loaded {
            prompts: Vec::new(),
            workflow: None,
            api: Some(JsonTree::new(Some(&prompt), &RenderOptions::api(), &i18n)),
        };
        let view = render(ModalTab::Api, &loaded, 0, 1);
        assert!(matches!(
            view.content,
            TabContent::Api {
                panel: Panel::Ready { .. }
            }
        ));
        let active: Vec<ModalTab> = view.tabs.iter().filter(|t| t.active).map(|t| t.value).collect();
        assert_eq!(active, [ModalTab::Api]);
    }
}
