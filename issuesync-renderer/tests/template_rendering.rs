use chrono::{TimeZone, Utc};
use issuesync_core::{frontmatter, EventInfo, HostContext, RepoRef};
use issuesync_renderer::{RenderContext, TemplateEngine};

fn demo_context() -> RenderContext {
    RenderContext::new(
        RepoRef::new("octo", "demo"),
        EventInfo {
            actor: Some("hubot".to_string()),
            payload: serde_json::json!({ "release": { "tag_name": "v1.2.0" } }),
            ..EventInfo::default()
        },
        vec![("DEPLOY_ENV".to_string(), "staging".to_string())],
        Utc.with_ymd_and_hms(2024, 7, 4, 8, 30, 0).unwrap(),
    )
}

#[test]
fn welcome_issue_scenario() {
    let file = frontmatter::parse(
        "---\ntitle: Welcome {{ repo.repo }}\n---\nHello {{ date | date('YYYY') }}",
    )
    .expect("front matter");
    let title = file.attributes.title.as_deref().expect("title");

    let issue = TemplateEngine::new()
        .render_issue(title, &file.body, &demo_context())
        .expect("render");

    assert_eq!(issue.title, "Welcome demo");
    assert_eq!(issue.body, "Hello 2024");
}

#[test]
fn rendering_is_idempotent() {
    let engine = TemplateEngine::new();
    let ctx = demo_context();
    let template = "{{ actor }} shipped {{ payload.release.tag_name }} to {{ env.DEPLOY_ENV }} \
                    on {{ date | date('dddd, MMMM Do YYYY') }}\n";

    let first = engine.render_str(template, &ctx).expect("first render");
    let second = engine.render_str(template, &ctx).expect("second render");

    assert_eq!(first, second);
    assert_eq!(first, "hubot shipped v1.2.0 to staging on Thursday, July 4th 2024\n");
}

#[test]
fn markdown_body_passes_through_untouched() {
    let body = "## Checklist\n\n- [ ] <kbd>Ctrl</kbd> & friends\n- [x] `{{ repo.owner }}`\n";
    let out = TemplateEngine::new()
        .render_str(body, &demo_context())
        .expect("render");
    assert_eq!(out, "## Checklist\n\n- [ ] <kbd>Ctrl</kbd> & friends\n- [x] `octo`\n");
}

#[test]
fn context_from_host_carries_event_metadata() {
    let host = HostContext::from_lookup(|key| match key {
        "GITHUB_REPOSITORY" => Some("octo/demo".to_string()),
        "GITHUB_EVENT_NAME" => Some("schedule".to_string()),
        _ => None,
    })
    .expect("host");
    let ctx = RenderContext::from_host(&host, Vec::new(), Utc::now());

    let out = TemplateEngine::new()
        .render_str("{{ eventName }} in {{ repo.owner }}/{{ repo.repo }}", &ctx)
        .expect("render");
    assert_eq!(out, "schedule in octo/demo");
}
