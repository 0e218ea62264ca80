use chrono::NaiveDate;
use folio_core::{
    Article, ContentItem, ContentKind, ContentValidationError, Project, ProjectStatus,
};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

#[test]
fn article_serialization_uses_expected_wire_fields() {
    let mut article = Article::new("react-best-practices", "React Best Practices", date());
    article.tags = vec!["React".to_string(), "Performance".to_string()];
    article.read_time = "8 min read".to_string();
    let item = ContentItem::from(article);

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["type"], "article");
    assert_eq!(json["id"], "react-best-practices");
    assert_eq!(json["date"], "2024-01-15");
    assert_eq!(json["tags"][1], "Performance");
    assert_eq!(json["read_time"], "8 min read");
    assert!(json.get("image").is_none());

    let decoded: ContentItem = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, item);
}

#[test]
fn project_status_uses_kebab_case_on_the_wire() {
    let value = serde_json::json!({
        "type": "project",
        "id": "e-commerce-platform",
        "title": "Modern E-commerce Platform",
        "summary": "Full-stack shop",
        "body": "# Shop",
        "technologies": ["Next.js", "Stripe"],
        "date": "2024-01-12",
        "status": "in-progress",
        "repo_url": "https://github.com/username/ecommerce-platform"
    });

    let item: ContentItem = serde_json::from_value(value).unwrap();
    let project = item.as_project().unwrap();
    assert_eq!(project.status, ProjectStatus::InProgress);
    assert_eq!(project.demo_url, None);
    assert_eq!(item.kind(), ContentKind::Project);
    assert_eq!(item.labels(), ["Next.js".to_string(), "Stripe".to_string()]);
    assert_eq!(item.path(), "/projects/e-commerce-platform");
}

#[test]
fn unknown_status_is_rejected() {
    let value = serde_json::json!({
        "type": "project",
        "id": "x",
        "title": "X",
        "summary": "",
        "body": "",
        "date": "2024-01-12",
        "status": "abandoned"
    });
    assert!(serde_json::from_value::<ContentItem>(value).is_err());
}

#[test]
fn shared_accessors_dispatch_on_variant() {
    let mut project = Project::new("viz", "Dashboard", date(), ProjectStatus::Completed);
    project.image = Some("/img/viz.png".to_string());
    let item = ContentItem::from(project);

    assert_eq!(item.id(), "viz");
    assert_eq!(item.title(), "Dashboard");
    assert_eq!(item.date(), date());
    assert_eq!(item.image(), Some("/img/viz.png"));
    assert!(item.as_article().is_none());
    assert_eq!(item.kind().listing_path(), "/projects");
}

#[test]
fn validate_rejects_ids_unsafe_for_paths() {
    for id in ["Has Space", "UPPER", "-leading", "slash/inside"] {
        let item = ContentItem::from(Article::new(id, "Title", date()));
        assert_eq!(
            item.validate().unwrap_err(),
            ContentValidationError::InvalidId(id.to_string())
        );
    }

    let blank = ContentItem::from(Article::new("  ", "Title", date()));
    assert_eq!(blank.validate().unwrap_err(), ContentValidationError::BlankId);
}

#[test]
fn validate_rejects_blank_title_and_labels() {
    let untitled = ContentItem::from(Article::new("untitled", " ", date()));
    assert_eq!(
        untitled.validate().unwrap_err(),
        ContentValidationError::BlankTitle {
            id: "untitled".to_string()
        }
    );

    let mut tagged = Article::new("tagged", "Tagged", date());
    tagged.tags = vec!["Rust".to_string(), "".to_string()];
    assert_eq!(
        ContentItem::from(tagged).validate().unwrap_err(),
        ContentValidationError::BlankLabel {
            id: "tagged".to_string()
        }
    );
}

#[test]
fn validate_accepts_https_links() {
    let mut project = Project::new("chat", "Chat", date(), ProjectStatus::Completed);
    project.demo_url = Some("https://ai-chat-demo.vercel.app".to_string());
    project.repo_url = Some("https://github.com/username/ai-chat-app".to_string());
    assert!(ContentItem::from(project).validate().is_ok());
}
