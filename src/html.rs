//! Server-side rendering of the dashboard page.

use url::form_urlencoded;

use crate::build_info;
use crate::error::{Result, StudyError};
use crate::model::{DayRecord, RoadmapDocument, Task};
use crate::output::{status_badge, subject_icon};
use crate::progress::{self, Progress};

const STYLE: &str = r#"
body { margin: 0; display: flex; font-family: system-ui, sans-serif; color: #262730; }
aside { width: 18rem; min-height: 100vh; padding: 1.5rem; box-sizing: border-box; }
aside { background: #f0f2f6; }
main { flex: 1; padding: 2rem 3rem; }
.metric .label { display: block; font-size: 0.85rem; color: #555; }
.metric .value { font-size: 2rem; }
progress { width: 100%; }
select { width: 100%; margin-top: 0.3rem; }
.notice { padding: 0.8rem 1rem; border-radius: 0.4rem; }
.notice.warning { background: #fffce7; color: #926c05; }
.notice.info { background: #e8f2fc; color: #0c4a8a; }
.day-header { display: flex; justify-content: space-between; align-items: center; }
.task-row { display: grid; grid-template-columns: 3rem 1fr 10rem; align-items: center; }
.caption { color: #808495; font-size: 0.85rem; margin: 0.2rem 0 0; }
.badge { padding: 0.4rem 0.8rem; border-radius: 0.4rem; text-align: center; }
.badge.done { background: #e6f4ea; color: #1e6e34; }
.badge.pending { background: #e8f2fc; color: #0c4a8a; }
"#;

/// Escape text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Dashboard URL with `day` selected.
pub fn day_href(day_id: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("day", day_id)
        .finish();
    format!("/?{query}")
}

/// Render the full page. `selected` must name a day in `doc` or be `None`.
pub fn render_dashboard(
    doc: &RoadmapDocument,
    selected: Option<&str>,
    roadmap_file: &str,
) -> Result<String> {
    let mut page = String::new();
    page.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n");
    page.push_str("<meta charset=\"utf-8\">\n");
    page.push_str("<title>🚀 Study Roadmap</title>\n<style>");
    page.push_str(STYLE);
    page.push_str("</style>\n</head>\n<body>\n");

    render_sidebar(&mut page, doc, selected);

    page.push_str("<main>\n");
    match selected {
        Some(day_id) => {
            let day = doc
                .day(day_id)
                .ok_or_else(|| StudyError::DayNotFound(day_id.to_string()))?;
            render_day(&mut page, day_id, day)?;
        }
        None => {
            page.push_str(&format!(
                "<div class=\"notice info\">Please ensure '{}' is populated.</div>\n",
                escape(roadmap_file)
            ));
        }
    }
    page.push_str("</main>\n</body>\n</html>\n");
    Ok(page)
}

fn render_sidebar(page: &mut String, doc: &RoadmapDocument, selected: Option<&str>) {
    page.push_str("<aside>\n<h2>📅 Navigator</h2>\n");

    let overall = progress::overall(doc);
    match overall.percent() {
        Some(percent) => {
            page.push_str(&format!(
                "<div class=\"metric\"><span class=\"label\">Total Progress</span>\
                 <span class=\"value\">{percent}%</span></div>\n"
            ));
            page.push_str(&format!(
                "<progress value=\"{}\" max=\"{}\">{percent}%</progress>\n",
                overall.completed, overall.total
            ));
        }
        None => page.push_str("<div class=\"notice warning\">No tasks found.</div>\n"),
    }

    page.push_str(
        "<form method=\"get\" action=\"/\">\n<label for=\"day\">Select Day</label>\n\
         <select id=\"day\" name=\"day\" onchange=\"this.form.submit()\">\n",
    );
    for day_id in doc.sorted_day_ids() {
        let marker = if Some(day_id) == selected {
            " selected"
        } else {
            ""
        };
        let id = escape(day_id);
        page.push_str(&format!("<option value=\"{id}\"{marker}>{id}</option>\n"));
    }
    page.push_str("</select>\n<noscript><button type=\"submit\">Open</button></noscript>\n");
    page.push_str("</form>\n");

    page.push_str(&format!(
        "<hr>\n<p class=\"caption\">Built for the study grind 🧠 {}</p>\n</aside>\n",
        escape(&build_info::version_label())
    ));
}

fn render_day(page: &mut String, day_id: &str, day: &DayRecord) -> Result<()> {
    let (date, focus) = day.heading(day_id)?;
    let Progress { completed, total } = progress::of_day(day);

    page.push_str(&format!(
        "<div class=\"day-header\"><h1>🗓️ {}: {}</h1>\
         <div class=\"metric\"><span class=\"label\">Day Progress</span>\
         <span class=\"value\">{completed}/{total}</span></div></div>\n<hr>\n",
        escape(date),
        escape(focus)
    ));

    for task in &day.tasks {
        render_task(page, day_id, task);
    }
    Ok(())
}

fn render_task(page: &mut String, day_id: &str, task: &Task) {
    let done = task.status.is_done();
    let (checked, badge_class) = if done {
        (" checked", "done")
    } else {
        ("", "pending")
    };
    let topic = escape(&task.topic);

    page.push_str(&format!(
        "<div class=\"task-row\">\n\
         <form method=\"post\" action=\"/toggle\">\
         <input type=\"hidden\" name=\"day\" value=\"{day}\">\
         <input type=\"hidden\" name=\"task\" value=\"{id}\">\
         <input type=\"hidden\" name=\"status\" value=\"{next}\">\
         <input type=\"checkbox\" aria-label=\"{topic}\"{checked} \
         onchange=\"this.form.submit()\">\
         <noscript><button type=\"submit\">Toggle</button></noscript></form>\n\
         <div><strong>{icon} {subject}</strong>: {topic}\
         <p class=\"caption\">{action}</p></div>\n\
         <span class=\"badge {badge_class}\">{badge}</span>\n</div>\n<hr>\n",
        day = escape(day_id),
        id = task.id,
        next = task.status.toggled(),
        icon = subject_icon(&task.subject),
        subject = escape(&task.subject),
        action = escape(&task.action),
        badge = status_badge(task.status),
    ));
}
