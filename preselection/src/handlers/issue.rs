use actix_web::{
    get, post,
    web::{self, Json},
};
use common::{
    api::{hook::HookReply, schema::Schema},
    entities::issue::Issue,
    error,
};
use serde::{Deserialize, Serialize};

use crate::{
    service::issue::{IssueFormData, IssueFormInput, IssueService},
    AppRepositories,
};

/// Hook: issue-schema-definition.
#[post("/hooks/issue/schema")]
pub async fn issue_schema(
    Json(mut schema): web::Json<Schema>,
) -> error::Result<Json<HookReply<Schema>>> {
    IssueService::extend_schema(&mut schema);
    Ok(Json(HookReply::proceed(schema)))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueFormQuery {
    pub context_id: i64,
    pub issue_id: Option<i64>,
}

/// Hook: issue-form-template-render. `issueId` is absent when a new issue
/// is being created.
#[get("/hooks/issue/form")]
pub async fn issue_form(
    query: web::Query<IssueFormQuery>,
    repos: web::Data<AppRepositories>,
) -> error::Result<Json<HookReply<IssueFormData>>> {
    let data = IssueService::new(&repos)
        .form_data(query.context_id, query.issue_id)
        .await?;
    Ok(Json(HookReply::proceed(data)))
}

/// Hook: issue-form-field-registration. Extends the host's user-var list.
#[post("/hooks/issue/form/fields")]
pub async fn issue_form_fields(
    Json(mut user_vars): web::Json<Vec<String>>,
) -> error::Result<Json<HookReply<Vec<String>>>> {
    IssueService::register_form_fields(&mut user_vars);
    Ok(Json(HookReply::proceed(user_vars)))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueFormSaveRequest {
    pub issue: Issue,
    #[serde(default)]
    pub input: IssueFormInput,
}

/// Hook: issue-form-save.
#[post("/hooks/issue/form/save")]
pub async fn issue_form_save(
    Json(request): web::Json<IssueFormSaveRequest>,
    repos: web::Data<AppRepositories>,
) -> error::Result<Json<HookReply<Issue>>> {
    let issue = IssueService::new(&repos)
        .save_form(request.issue, &request.input)
        .await?;
    Ok(Json(HookReply::proceed(issue)))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueEditRequest {
    pub issue: Issue,
    pub previous: Issue,
}

/// Hook: issue-post-edit. Re-propagates values a partial edit left unset.
#[post("/hooks/issue/edit")]
pub async fn issue_edit(
    Json(request): web::Json<IssueEditRequest>,
    repos: web::Data<AppRepositories>,
) -> error::Result<Json<HookReply<Issue>>> {
    let issue = IssueService::new(&repos)
        .preserve_on_edit(request.issue, &request.previous)
        .await?;
    Ok(Json(HookReply::proceed(issue)))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenIssuesQuery {
    pub context_id: i64,
}

/// Eligible issues for a context, used by the submission UI.
#[get("/issues/open")]
pub async fn open_issues(
    query: web::Query<OpenIssuesQuery>,
    repos: web::Data<AppRepositories>,
) -> error::Result<Json<Vec<Issue>>> {
    let issues = IssueService::new(&repos)
        .open_future_issues(query.context_id)
        .await?;
    Ok(Json(issues))
}
