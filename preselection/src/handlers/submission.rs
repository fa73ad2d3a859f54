use actix_web::{
    get, post,
    web::{self, Json},
};
use common::{
    api::{
        form::FormConfig,
        hook::{HookReply, ValidationErrors},
        schema::Schema,
    },
    error,
};
use serde::{Deserialize, Serialize};

use crate::{
    service::submission::{ReviewPanel, SubmissionService},
    AppRepositories,
};

/// Hook: submission-schema-definition.
#[post("/hooks/submission/schema")]
pub async fn submission_schema(
    Json(mut schema): web::Json<Schema>,
) -> error::Result<Json<HookReply<Schema>>> {
    SubmissionService::extend_schema(&mut schema);
    Ok(Json(HookReply::proceed(schema)))
}

/// Hook: submission-list-serialization / submission-list-properties.
#[post("/hooks/submission/list-props")]
pub async fn submission_list_props(
    Json(mut props): web::Json<Vec<String>>,
) -> error::Result<Json<HookReply<Vec<String>>>> {
    SubmissionService::extend_list_props(&mut props);
    Ok(Json(HookReply::proceed(props)))
}

/// Hook: submission-form-config-render. Only the editors-comments form is
/// changed; everything else passes through untouched.
#[post("/hooks/submission/form")]
pub async fn submission_form(
    Json(mut config): web::Json<FormConfig>,
    repos: web::Data<AppRepositories>,
) -> error::Result<Json<HookReply<FormConfig>>> {
    SubmissionService::new(&repos)
        .inject_issue_field(&mut config)
        .await?;
    Ok(Json(HookReply::proceed(config)))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQuery {
    pub locale_key: String,
}

/// Hook: submission-wizard-review-render. The payload is `None` for locale
/// variants other than the submission's own.
#[get("/hooks/submission/{id}/review")]
pub async fn submission_review(
    id: web::Path<i64>,
    query: web::Query<ReviewQuery>,
    repos: web::Data<AppRepositories>,
) -> error::Result<Json<HookReply<Option<ReviewPanel>>>> {
    let panel = SubmissionService::new(&repos)
        .review_panel(id.into_inner(), &query.locale_key)
        .await?;
    Ok(Json(HookReply::proceed(panel)))
}

/// Hook: submission-validate. An unknown submission id validates to no
/// errors; the host treats missing entities as no-ops.
#[post("/hooks/submission/{id}/validate")]
pub async fn submission_validate(
    id: web::Path<i64>,
    repos: web::Data<AppRepositories>,
) -> error::Result<Json<HookReply<ValidationErrors>>> {
    let Some(submission) = repos.submissions.find(id.into_inner()).await? else {
        return Ok(Json(HookReply::proceed(ValidationErrors::new())));
    };

    let errors = SubmissionService::new(&repos)
        .validate_submit(&submission)
        .await?;
    Ok(Json(HookReply::proceed(errors)))
}

#[cfg(test)]
mod test {
    use actix_web::test::{self, call_and_read_body_json, init_service};
    use common::entities::{
        issue::Issue, publication::Publication, role::Role, submission::Submission,
        user::User, user_group::UserGroup,
    };
    use serde_json::Map;

    use crate::{constants::SUBMISSION_PRESELECTED_ISSUE_ID, create_app};

    use super::*;

    async fn seed_open_issue(repos: &AppRepositories, id: i64, edited_by: Vec<i64>) {
        repos
            .issues
            .save(&Issue {
                id,
                context_id: 1,
                volume: Some(1),
                number: Some(id.to_string()),
                year: Some(2024),
                title: None,
                published: false,
                is_open: Some(true),
                edited_by: Some(edited_by),
                last_modified: 0,
            })
            .await
            .unwrap();
    }

    async fn seed_submission(repos: &AppRepositories, id: i64, preselected: Option<i64>) {
        repos
            .submissions
            .save(&Submission {
                id,
                context_id: 1,
                locale: "en".to_string(),
                preselected_issue_id: preselected,
                last_modified: 0,
            })
            .await
            .unwrap();
        repos
            .publications
            .insert(&Publication {
                id: id * 10,
                submission_id: id,
                issue_id: None,
                last_modified: 0,
            })
            .await
            .unwrap();
    }

    #[actix_web::test]
    async fn submission_schema_gains_the_selection_property() {
        let mut app = init_service(create_app(AppRepositories::test())).await;

        let req = test::TestRequest::post()
            .uri("/api/hooks/submission/schema")
            .set_json(&Schema::default())
            .to_request();
        let reply: HookReply<Schema> = call_and_read_body_json(&mut app, req).await;

        assert!(!reply.halt);
        let property = reply
            .payload
            .properties
            .get(SUBMISSION_PRESELECTED_ISSUE_ID)
            .unwrap();
        assert!(property.api_summary);
        assert_eq!(property.write_disabled_in_api, Some(false));
    }

    #[actix_web::test]
    async fn list_props_are_extended_once() {
        let mut app = init_service(create_app(AppRepositories::test())).await;

        let req = test::TestRequest::post()
            .uri("/api/hooks/submission/list-props")
            .set_json(&vec!["id".to_string(), "title".to_string()])
            .to_request();
        let reply: HookReply<Vec<String>> = call_and_read_body_json(&mut app, req).await;

        assert_eq!(reply.payload, vec!["id", "title", "preselectedIssueId"]);
    }

    #[actix_web::test]
    async fn form_endpoint_injects_the_select_field() {
        let repos = AppRepositories::test();
        let mut app = init_service(create_app(repos.clone())).await;

        seed_open_issue(&repos, 42, vec![]).await;
        seed_submission(&repos, 12, None).await;

        let config = FormConfig {
            id: "commentsForTheEditors".to_string(),
            action: "http://journal.example/api/v1/submissions/12".to_string(),
            fields: Vec::new(),
            values: Map::new(),
            rest: Map::new(),
        };
        let req = test::TestRequest::post()
            .uri("/api/hooks/submission/form")
            .set_json(&config)
            .to_request();
        let reply: HookReply<FormConfig> = call_and_read_body_json(&mut app, req).await;

        assert!(!reply.halt);
        assert_eq!(reply.payload.fields.len(), 1);
        assert_eq!(reply.payload.fields[0].options.len(), 2);
    }

    #[actix_web::test]
    async fn review_endpoint_is_empty_for_other_locales() {
        let repos = AppRepositories::test();
        let mut app = init_service(create_app(repos.clone())).await;

        seed_open_issue(&repos, 42, vec![]).await;
        seed_submission(&repos, 1, Some(42)).await;

        let req = test::TestRequest::get()
            .uri("/api/hooks/submission/1/review?localeKey=fr")
            .to_request();
        let reply: HookReply<Option<ReviewPanel>> = call_and_read_body_json(&mut app, req).await;
        assert!(reply.payload.is_none());

        let req = test::TestRequest::get()
            .uri("/api/hooks/submission/1/review?localeKey=en")
            .to_request();
        let reply: HookReply<Option<ReviewPanel>> = call_and_read_body_json(&mut app, req).await;
        let panel = reply.payload.unwrap();
        assert_eq!(panel.selected_issue_id, 42);
        assert!(!panel.missing);
    }

    #[actix_web::test]
    async fn validate_endpoint_reports_the_missing_selection() {
        let repos = AppRepositories::test();
        let mut app = init_service(create_app(repos.clone())).await;

        seed_open_issue(&repos, 42, vec![]).await;
        seed_submission(&repos, 1, None).await;

        let req = test::TestRequest::post()
            .uri("/api/hooks/submission/1/validate")
            .to_request();
        let reply: HookReply<ValidationErrors> = call_and_read_body_json(&mut app, req).await;

        assert!(!reply.halt);
        assert!(reply
            .payload
            .contains_key(SUBMISSION_PRESELECTED_ISSUE_ID));
    }

    #[actix_web::test]
    async fn validate_endpoint_binds_and_assigns() {
        let repos = AppRepositories::test();
        let mut app = init_service(create_app(repos.clone())).await;

        seed_open_issue(&repos, 42, vec![7]).await;
        seed_submission(&repos, 1, Some(42)).await;
        repos
            .users
            .insert(&User {
                id: 7,
                given_name: "Sub".to_string(),
                family_name: "Editor".to_string(),
                last_modified: 0,
            })
            .await
            .unwrap();
        repos
            .user_groups
            .insert(&UserGroup {
                id: 3,
                context_id: 1,
                role: Role::SubEditor,
                members: vec![7],
                last_modified: 0,
            })
            .await
            .unwrap();

        let req = test::TestRequest::post()
            .uri("/api/hooks/submission/1/validate")
            .to_request();
        let reply: HookReply<ValidationErrors> = call_and_read_body_json(&mut app, req).await;
        assert!(reply.payload.is_empty());

        let publication = repos.publications.by_submission(1).await.unwrap().unwrap();
        assert_eq!(publication.issue_id, Some(42));
        let assignments = repos.stage_assignments.by_submission(1).await.unwrap();
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].user_id, 7);
    }

    #[actix_web::test]
    async fn validate_endpoint_ignores_unknown_submissions() {
        let mut app = init_service(create_app(AppRepositories::test())).await;

        let req = test::TestRequest::post()
            .uri("/api/hooks/submission/999/validate")
            .to_request();
        let reply: HookReply<ValidationErrors> = call_and_read_body_json(&mut app, req).await;
        assert!(reply.payload.is_empty());
    }
}
