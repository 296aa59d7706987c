use std::collections::BTreeSet;
use std::rc::Rc;
use std::sync::Arc;

use chrono::Local;
use dioxus::prelude::*;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::entities::query::{SortConfig, SortDirection};
use crate::domain::entities::saved_query::{auto_query_name, most_recent, NewSavedQuery};
use crate::domain::entities::screen::{FilterDescription, ScreenRequest, Timeframe};
use crate::domain::entities::tag::{tag_color, TAG_VOCABULARY};
use crate::domain::pipeline::csv_export::{export_file_name, ExportError};
use crate::domain::pipeline::paginate::PageLink;
use crate::infra::http::screener_client::HttpScreenerGateway;
use crate::infra::memory::kv::MemoryKvStore;
use crate::infra::sqlite::repo::SqliteKvStore;
use crate::ui::state::app_state::AppState;
use crate::ui::style::{
    column_alignment, filter_cell_style, format_cell_value, modal_backdrop_style,
    page_button_style, root_container_style, table_container_style, table_header_cell_style,
    tag_chip_style,
};
use crate::usecase::ports::repo::KeyValueStore;
use crate::usecase::ports::screener::ScreenerGateway;
use crate::usecase::services::import_service::ImportService;
use crate::usecase::services::saved_query_service::{SavedQueryError, SavedQueryStore};
use crate::usecase::services::screening_service::{
    validate_request, ScreenOutcome, ScreeningError, ScreeningService,
};

struct Services {
    import: ImportService,
    saved_queries: SavedQueryStore,
    screening: ScreeningService,
    recent_query_count: usize,
}

impl Services {
    fn build(config: &AppConfig) -> Self {
        let kv: Arc<dyn KeyValueStore> = match SqliteKvStore::open(config.db_path.clone()) {
            Ok(store) => Arc::new(store),
            Err(err) => {
                warn!(
                    path = %config.db_path.display(),
                    error = %err,
                    "saved queries fall back to memory"
                );
                Arc::new(MemoryKvStore::new())
            }
        };
        let gateway: Arc<dyn ScreenerGateway> = Arc::new(HttpScreenerGateway::new(
            config.api_base_url.clone(),
            config.request_timeout,
        ));

        Self {
            import: ImportService::new(),
            saved_queries: SavedQueryStore::new(kv),
            screening: ScreeningService::new(gateway),
            recent_query_count: config.recent_query_count,
        }
    }
}

pub(crate) fn sort_indicator(sort: Option<&SortConfig>, column: &str) -> &'static str {
    match sort {
        Some(config) if config.key == column => match config.direction {
            SortDirection::Asc => " ▲",
            SortDirection::Desc => " ▼",
        },
        _ => "",
    }
}

/// An unparsable limit becomes 0 so validation reports it as out of range.
pub(crate) fn build_screen_request(
    search_text: &str,
    timeframe: Timeframe,
    limit_text: &str,
) -> ScreenRequest {
    let limit = limit_text.trim().parse::<usize>().unwrap_or(0);
    ScreenRequest::new(
        vec![timeframe],
        FilterDescription::expression(search_text.trim()),
        limit,
    )
}

pub(crate) fn screening_error_message(err: &ScreeningError) -> String {
    match err {
        ScreeningError::EmptyExpression => "請輸入篩選條件".to_string(),
        ScreeningError::NoConditions => "請至少設定一個篩選條件".to_string(),
        ScreeningError::TimeframeCount(count) => {
            format!("時間週期數量須為 1 到 5 個（目前 {count} 個）")
        }
        ScreeningError::LimitOutOfRange(_) => "筆數上限須介於 1 到 10000".to_string(),
        ScreeningError::Busy => "搜尋進行中，請稍候".to_string(),
        ScreeningError::Transport(inner) => format!("篩選失敗：{inner}"),
    }
}

pub(crate) fn count_summary(filtered: usize, total: usize) -> String {
    if filtered == total {
        format!("共 {total} 筆")
    } else {
        format!("顯示 {filtered} / {total} 筆")
    }
}

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();
    let services = use_hook(|| Rc::new(Services::build(&config)));

    let AppState {
        mut session,
        mut saved_queries,
        mut dataset_label,
        mut busy,
        mut loading,
        mut status,
        mut search_text,
        mut timeframe,
        mut result_limit,
        mut show_save_dialog,
        mut save_name,
        mut save_description,
        mut save_tags,
    } = AppState::new(config.page_size);

    let services_for_init = services.clone();
    use_effect(move || {
        let queries = services_for_init.saved_queries.list();
        info!(count = queries.len(), "saved queries loaded");
        saved_queries.set(queries);
    });

    let services_for_open = services.clone();
    let open_dataset = move |_: MouseEvent| {
        let Some(file_path) = FileDialog::new()
            .add_filter("CSV", &["csv"])
            .add_filter("Excel", &["xlsx", "xlsm", "xls", "ods"])
            .add_filter("所有檔案", &["*"])
            .pick_file()
        else {
            return;
        };

        *busy.write() = true;
        *status.write() = format!("正在載入 {}", file_path.display());
        // A screening response still in flight must not replace the file just opened.
        services_for_open.screening.invalidate();
        match services_for_open.import.load(&file_path) {
            Ok(records) => {
                let count = records.len();
                session.write().load(records);
                dataset_label.set(Some(file_path.display().to_string()));
                *status.write() = format!("已載入 {count} 筆資料");
            }
            Err(err) => {
                *status.write() = format!("載入資料失敗：{err}");
            }
        }
        *busy.write() = false;
    };

    let services_for_search = services.clone();
    let run_search = move |_: MouseEvent| {
        if loading() || services_for_search.screening.is_loading() {
            *status.write() = screening_error_message(&ScreeningError::Busy);
            return;
        }
        let request = build_screen_request(&search_text(), timeframe(), &result_limit());
        if let Err(err) = validate_request(&request) {
            *status.write() = screening_error_message(&err);
            return;
        }

        loading.set(true);
        *status.write() = "搜尋中…".to_string();
        let services = services_for_search.clone();
        spawn(async move {
            match services.screening.screen(request).await {
                Ok(ScreenOutcome::Fresh { records, .. }) => {
                    let count = records.len();
                    session.write().load(records);
                    dataset_label.set(Some("遠端篩選結果".to_string()));
                    *status.write() = format!("找到 {count} 檔股票");
                }
                Ok(ScreenOutcome::Stale { generation }) => {
                    info!(generation, "screening result superseded");
                }
                Err(err) => {
                    *status.write() = screening_error_message(&err);
                }
            }
            loading.set(false);
        });
    };

    let export_results = move |_: MouseEvent| {
        let exported = session.read().export();
        match exported {
            Ok(csv_text) => {
                let Some(file_path) = FileDialog::new()
                    .add_filter("CSV", &["csv"])
                    .set_file_name(export_file_name(Local::now().date_naive()))
                    .save_file()
                else {
                    return;
                };
                match std::fs::write(&file_path, csv_text) {
                    Ok(()) => {
                        info!(path = %file_path.display(), "screening results exported");
                        *status.write() = format!("已匯出 {}", file_path.display());
                    }
                    Err(err) => {
                        *status.write() = format!("匯出失敗：{err}");
                    }
                }
            }
            Err(ExportError::NothingToExport) => {
                MessageDialog::new()
                    .set_level(MessageLevel::Info)
                    .set_title("匯出 CSV")
                    .set_description("目前沒有可匯出的資料")
                    .set_buttons(MessageButtons::Ok)
                    .show();
                *status.write() = "沒有可匯出的資料".to_string();
            }
            Err(err) => {
                *status.write() = format!("匯出失敗：{err}");
            }
        }
    };

    let services_for_store = services.clone();
    let save_dataset = move |_: MouseEvent| {
        let records = session.read().dataset().to_vec();
        if records.is_empty() {
            *status.write() = "尚未載入資料".to_string();
            return;
        }
        let Some(file_path) = FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name("screening_dataset.csv")
            .save_file()
        else {
            return;
        };
        *busy.write() = true;
        match services_for_store.import.save(&file_path, &records) {
            Ok(()) => {
                *status.write() = format!("已儲存資料檔 {}", file_path.display());
            }
            Err(err) => {
                *status.write() = format!("儲存資料檔失敗：{err}");
            }
        }
        *busy.write() = false;
    };

    let open_save_dialog = move |_: MouseEvent| {
        let name = auto_query_name(session.read().filters(), Local::now().date_naive());
        save_name.set(name);
        save_description.set(String::new());
        save_tags.set(BTreeSet::new());
        show_save_dialog.set(true);
    };

    let services_for_save = services.clone();
    let confirm_save = move |_: MouseEvent| {
        let definition = {
            let current = session.read();
            NewSavedQuery {
                name: save_name(),
                description: save_description().trim().to_string(),
                tags: save_tags(),
                filters: current.filters().compacted(),
                sort_config: current.sort().cloned(),
                result_count: current.filtered_count(),
                total_count: current.total_count(),
            }
        };
        match services_for_save.saved_queries.create(definition) {
            Ok(saved) => {
                *status.write() = format!("已儲存查詢「{}」", saved.name);
                saved_queries.set(services_for_save.saved_queries.list());
                show_save_dialog.set(false);
            }
            Err(SavedQueryError::EmptyName) => {
                *status.write() = "請輸入查詢名稱".to_string();
            }
            Err(err) => {
                *status.write() = format!("儲存查詢失敗：{err}");
            }
        }
    };

    let page = session.read().current_page();
    let window = page.window;
    let sort_state = session.read().sort().cloned();
    let filters_snapshot = session.read().filters().clone();
    let alignments: Vec<&'static str> = page
        .columns
        .iter()
        .map(|column| column_alignment(column, &page.rows))
        .collect();
    let summary = count_summary(page.filtered_count, page.total_count);
    let source_label = dataset_label().unwrap_or_else(|| "(未載入資料)".to_string());
    let recent = most_recent(&saved_queries.read(), services.recent_query_count);
    let is_working = busy() || loading();
    let selected_tags = save_tags();
    let current_timeframe = timeframe();

    rsx! {
        div {
            style: root_container_style(),

            div {
                style: "display: flex; flex-wrap: wrap; gap: 8px; align-items: center; margin-bottom: 8px;",
                button { disabled: is_working, onclick: open_dataset, "開啟資料檔" }
                button { disabled: is_working, onclick: save_dataset, "另存資料檔" }
                button { onclick: export_results, "匯出 CSV" }
                button { onclick: open_save_dialog, "儲存查詢" }
                button {
                    onclick: move |_| session.write().clear_filters(),
                    "清除篩選"
                }
                span { style: "color: #555;", "{source_label}" }
            }

            div {
                style: "display: flex; flex-wrap: wrap; gap: 8px; align-items: center; margin-bottom: 8px;",
                input {
                    style: "flex: 1; min-width: 240px; padding: 4px 8px;",
                    placeholder: "篩選條件，例如 rsi_14 < 30 and close > 10",
                    value: "{search_text}",
                    oninput: move |event| search_text.set(event.value()),
                }
                select {
                    onchange: move |event| {
                        if let Some(parsed) = Timeframe::parse(&event.value()) {
                            timeframe.set(parsed);
                        }
                    },
                    {Timeframe::ALL.iter().map(|tf| {
                        let value = tf.as_str();
                        let is_selected = *tf == current_timeframe;
                        rsx!(
                            option { key: "{value}", value: "{value}", selected: is_selected, "{value}" }
                        )
                    })}
                }
                input {
                    style: "width: 80px; padding: 4px 8px;",
                    r#type: "number",
                    min: "1",
                    max: "10000",
                    value: "{result_limit}",
                    oninput: move |event| result_limit.set(event.value()),
                }
                button { disabled: loading(), onclick: run_search, "搜尋" }
                if loading() {
                    span { style: "color: #1f77b4;", "搜尋中…" }
                }
            }

            div {
                style: "display: flex; gap: 12px; flex: 1; min-height: 0;",

                div {
                    style: "display: flex; flex-direction: column; flex: 1; min-width: 0;",
                    div { style: "margin-bottom: 4px; color: #333;", "{summary}" }
                    div {
                        style: table_container_style(),
                        table {
                            style: "border-collapse: collapse; width: max-content; min-width: 100%;",
                            thead {
                                tr {
                                    {page.columns.iter().zip(alignments.iter()).map(|(column, align)| {
                                        let label = format!("{column}{}", sort_indicator(sort_state.as_ref(), column));
                                        let header_key = column.clone();
                                        let sort_key = column.clone();
                                        let style = format!("{} text-align: {align};", table_header_cell_style());
                                        rsx!(
                                            th {
                                                key: "{header_key}",
                                                style: "{style}",
                                                onclick: move |_| session.write().toggle_sort(&sort_key),
                                                "{label}"
                                            }
                                        )
                                    })}
                                }
                                tr {
                                    {page.columns.iter().map(|column| {
                                        let cell_key = format!("filter-{column}");
                                        let field = column.clone();
                                        let current = filters_snapshot.get(column).to_string();
                                        rsx!(
                                            th {
                                                key: "{cell_key}",
                                                style: filter_cell_style(),
                                                input {
                                                    style: "width: 100%; box-sizing: border-box; padding: 2px 4px;",
                                                    placeholder: "篩選",
                                                    value: "{current}",
                                                    oninput: move |event| session.write().set_filter(&field, &event.value()),
                                                }
                                            }
                                        )
                                    })}
                                }
                            }
                            tbody {
                                {page.rows.iter().enumerate().map(|(row_idx, record)| {
                                    let background = if row_idx % 2 == 0 { "#fff" } else { "#fafafa" };
                                    rsx!(
                                        tr {
                                            key: "{row_idx}",
                                            style: "background: {background};",
                                            {page.columns.iter().zip(alignments.iter()).map(|(column, align)| {
                                                let text = format_cell_value(record.get(column));
                                                let cell_key = format!("{row_idx}-{column}");
                                                rsx!(
                                                    td {
                                                        key: "{cell_key}",
                                                        style: "border: 1px solid #ddd; padding: 4px 8px; white-space: nowrap; text-align: {align};",
                                                        "{text}"
                                                    }
                                                )
                                            })}
                                        }
                                    )
                                })}
                            }
                        }
                    }

                    if window.total_pages > 0 {
                        div {
                            style: "display: flex; gap: 4px; align-items: center; padding: 8px 0;",
                            button {
                                style: page_button_style(false),
                                disabled: !window.has_previous(),
                                onclick: move |_| session.write().previous_page(),
                                "上一頁"
                            }
                            {page.links.iter().enumerate().map(|(idx, link)| match *link {
                                PageLink::Page(number) => {
                                    let link_key = format!("page-{number}");
                                    rsx!(
                                        button {
                                            key: "{link_key}",
                                            style: page_button_style(number == window.current_page),
                                            onclick: move |_| session.write().goto_page(number),
                                            "{number}"
                                        }
                                    )
                                }
                                PageLink::Ellipsis => {
                                    let link_key = format!("ellipsis-{idx}");
                                    rsx!(span { key: "{link_key}", style: "padding: 0 4px;", "…" })
                                }
                            })}
                            button {
                                style: page_button_style(false),
                                disabled: !window.has_next(),
                                onclick: move |_| session.write().next_page(),
                                "下一頁"
                            }
                            span {
                                style: "margin-left: 8px; color: #555;",
                                "第 {window.current_page} / {window.total_pages} 頁"
                            }
                        }
                    }
                }

                div {
                    style: "width: 260px; flex-shrink: 0; overflow-y: auto; border-left: 1px solid #ddd; padding-left: 12px;",
                    h3 { style: "margin: 0 0 8px 0; font-size: 15px;", "最近的查詢" }
                    if recent.is_empty() {
                        div { style: "color: #888;", "尚無已儲存的查詢" }
                    }
                    {recent.into_iter().map(|query| {
                        let entry_key = query.id.to_string();
                        let name = query.name.clone();
                        let description = query.description.clone();
                        let counts = format!("{} / {} 筆", query.result_count, query.total_count);
                        let saved_at = query
                            .timestamp
                            .with_timezone(&Local)
                            .format("%Y-%m-%d %H:%M")
                            .to_string();
                        let query_string = query.replay_query_string();
                        let tag_chips: Vec<(String, String)> = query
                            .tags
                            .iter()
                            .map(|tag| (tag.clone(), tag_chip_style(tag_color(tag), false)))
                            .collect();
                        let delete_id = query.id;
                        let delete_name = query.name.clone();
                        let services_for_delete = services.clone();
                        rsx!(
                            div {
                                key: "{entry_key}",
                                style: "border: 1px solid #e5e7eb; border-radius: 6px; padding: 8px; margin-bottom: 8px;",
                                title: "{query_string}",
                                div { style: "font-weight: 600;", "{name}" }
                                div { style: "font-size: 12px; color: #666;", "{saved_at} · {counts}" }
                                if !description.is_empty() {
                                    div { style: "font-size: 12px; margin-top: 4px;", "{description}" }
                                }
                                div {
                                    {tag_chips.into_iter().map(|(tag, style)| rsx!(
                                        span { key: "{tag}", style: "{style}", "{tag}" }
                                    ))}
                                }
                                div {
                                    style: "display: flex; gap: 6px; margin-top: 6px;",
                                    button {
                                        onclick: move |_| {
                                            session.write().replay(query.replay_filters(), query.sort_config.clone());
                                            *status.write() = format!("已套用查詢「{}」", query.name);
                                        },
                                        "套用"
                                    }
                                    button {
                                        onclick: move |_| {
                                            let confirm = MessageDialog::new()
                                                .set_level(MessageLevel::Warning)
                                                .set_title("刪除查詢")
                                                .set_description(format!("確定要刪除查詢「{delete_name}」？"))
                                                .set_buttons(MessageButtons::YesNo)
                                                .show();
                                            if confirm != MessageDialogResult::Yes {
                                                return;
                                            }
                                            match services_for_delete.saved_queries.delete(delete_id) {
                                                Ok(()) => {
                                                    saved_queries.set(services_for_delete.saved_queries.list());
                                                    *status.write() = format!("已刪除查詢「{delete_name}」");
                                                }
                                                Err(err) => {
                                                    *status.write() = format!("刪除查詢失敗：{err}");
                                                }
                                            }
                                        },
                                        "刪除"
                                    }
                                }
                            }
                        )
                    })}
                }
            }

            div {
                style: "margin-top: 6px; padding: 4px 8px; background: #f5f5f5; border-top: 1px solid #ddd; font-size: 13px;",
                if is_working { "處理中… " }
                "{status}"
            }

            if show_save_dialog() {
                div {
                    style: modal_backdrop_style(),
                    div {
                        style: "background: #fff; border-radius: 8px; padding: 16px; width: 420px; box-shadow: 0 10px 24px rgba(0,0,0,0.2);",
                        h3 { style: "margin-top: 0;", "儲存查詢" }
                        div { style: "margin-bottom: 6px; color: #555;", "{summary}" }
                        label { "名稱" }
                        input {
                            style: "width: 100%; box-sizing: border-box; margin-bottom: 8px; padding: 4px 8px;",
                            value: "{save_name}",
                            oninput: move |event| save_name.set(event.value()),
                        }
                        label { "說明" }
                        textarea {
                            style: "width: 100%; box-sizing: border-box; margin-bottom: 8px; padding: 4px 8px;",
                            value: "{save_description}",
                            oninput: move |event| save_description.set(event.value()),
                        }
                        label { "標籤" }
                        div {
                            style: "margin-bottom: 12px;",
                            {TAG_VOCABULARY.iter().map(|tag| {
                                let label = tag.to_string();
                                let toggle = tag.to_string();
                                let style = tag_chip_style(tag_color(tag), selected_tags.contains(*tag));
                                rsx!(
                                    span {
                                        key: "{label}",
                                        style: "{style}",
                                        onclick: move |_| {
                                            let mut tags = save_tags.write();
                                            if !tags.remove(&toggle) {
                                                tags.insert(toggle.clone());
                                            }
                                        },
                                        "{label}"
                                    }
                                )
                            })}
                        }
                        div {
                            style: "display: flex; justify-content: flex-end; gap: 8px;",
                            button { onclick: move |_| show_save_dialog.set(false), "取消" }
                            button { onclick: confirm_save, "儲存" }
                        }
                    }
                }
            }
        }
    }
}
