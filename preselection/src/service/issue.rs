use common::{
    api::{
        form::FieldOption,
        schema::{Property, Schema},
    },
    entities::{issue::Issue, role::Role},
    error,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    constants::{ISSUE_EDITED_BY, ISSUE_IS_OPEN},
    repositories::{issue::IssueRepo, user::UserRepo, user_group::UserGroupRepo},
    AppRepositories,
};

/// Values the issue editing form needs to render the extra fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IssueFormData {
    pub is_open: bool,
    pub edited_by: Vec<i64>,
    pub editor_options: Vec<FieldOption>,
}

/// Raw user vars as the host's form layer read them. Both fields may carry
/// whatever the client sent; coercion happens on save.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IssueFormInput {
    #[serde(default)]
    pub is_open: Option<Value>,
    #[serde(default)]
    pub edited_by: Option<Value>,
}

pub struct IssueService {
    issues: IssueRepo,
    users: UserRepo,
    user_groups: UserGroupRepo,
}

impl IssueService {
    pub fn new(repos: &AppRepositories) -> Self {
        Self {
            issues: repos.issues.clone(),
            users: repos.users.clone(),
            user_groups: repos.user_groups.clone(),
        }
    }

    /// Declares `isOpen` and `editedBy` as first-class issue attributes,
    /// both nullable and excluded from API summaries.
    pub fn extend_schema(schema: &mut Schema) {
        schema
            .properties
            .insert(ISSUE_IS_OPEN.to_string(), Property::boolean().nullable());
        schema.properties.insert(
            ISSUE_EDITED_BY.to_string(),
            Property::array_of(Property::integer()).nullable(),
        );
        log::info!("added {} and {} to issue schema", ISSUE_IS_OPEN, ISSUE_EDITED_BY);
    }

    /// Whitelists the custom fields for the host's generic form reader.
    pub fn register_form_fields(user_vars: &mut Vec<String>) {
        user_vars.push(ISSUE_IS_OPEN.to_string());
        user_vars.push(ISSUE_EDITED_BY.to_string());
    }

    pub async fn find(&self, id: i64) -> error::Result<Option<Issue>> {
        Ok(self.issues.find(id).await?)
    }

    /// Unpublished issues of the context whose open flag is exactly `true`.
    pub async fn open_future_issues(&self, context_id: i64) -> error::Result<Vec<Issue>> {
        let issues = self.issues.unpublished(context_id).await?;
        let open = issues
            .into_iter()
            .filter(Issue::is_open_for_submission)
            .collect::<Vec<_>>();
        log::info!("context {}: {} open future issues", context_id, open.len());
        Ok(open)
    }

    /// Current field values plus editor candidates for the issue form. A
    /// missing or absent issue id renders like a brand-new issue.
    pub async fn form_data(
        &self,
        context_id: i64,
        issue_id: Option<i64>,
    ) -> error::Result<IssueFormData> {
        let mut is_open = false;
        let mut edited_by = Vec::new();

        if let Some(issue_id) = issue_id {
            if let Some(issue) = self.issues.find(issue_id).await? {
                is_open = issue.is_open.unwrap_or(false);
                edited_by = issue.edited_by.unwrap_or_default();
            } else {
                log::warn!("issue {} not found while rendering form", issue_id);
            }
        }

        Ok(IssueFormData {
            is_open,
            edited_by,
            editor_options: self.editor_options(context_id).await?,
        })
    }

    /// Coerces the submitted values and writes them onto the issue, then
    /// persists it.
    pub async fn save_form(&self, mut issue: Issue, input: &IssueFormInput) -> error::Result<Issue> {
        issue.is_open = Some(coerce_flag(&input.is_open));
        issue.edited_by = Some(coerce_editor_ids(&input.edited_by));
        issue.last_modified = common::default_timestamp();

        self.issues.save(&issue).await?;
        log::info!(
            "saved issue {} form data: isOpen={:?}, {} editors",
            issue.id,
            issue.is_open,
            issue.edited_by.as_ref().map(Vec::len).unwrap_or(0),
        );
        Ok(issue)
    }

    /// Carries the previous values forward when an edit payload leaves them
    /// unset. Without this, a partial edit would silently clear the flags.
    pub async fn preserve_on_edit(
        &self,
        mut issue: Issue,
        previous: &Issue,
    ) -> error::Result<Issue> {
        if issue.is_open.is_none() && previous.is_open.is_some() {
            issue.is_open = previous.is_open;
            log::info!("issue {}: preserved isOpen across edit", issue.id);
        }
        if issue.edited_by.is_none() && previous.edited_by.is_some() {
            issue.edited_by = previous.edited_by.clone();
            log::info!("issue {}: preserved editedBy across edit", issue.id);
        }

        self.issues.save(&issue).await?;
        Ok(issue)
    }

    /// Editor candidates for a context: members of manager groups, then
    /// sub-editor groups, deduplicated by user id, labelled with full names.
    pub async fn editor_options(&self, context_id: i64) -> error::Result<Vec<FieldOption>> {
        let groups = self.user_groups.by_context(context_id).await?;

        let mut options: Vec<FieldOption> = Vec::new();
        for role in [Role::Manager, Role::SubEditor] {
            for group in groups.iter().filter(|g| g.role == role) {
                for &user_id in &group.members {
                    if options.iter().any(|o| o.value == user_id) {
                        continue;
                    }
                    let Some(user) = self.users.find(user_id).await? else {
                        continue;
                    };
                    options.push(FieldOption {
                        value: user_id,
                        label: user.full_name(),
                    });
                }
            }
        }
        Ok(options)
    }
}

/// Host forms deliver loosely typed values; anything truthy becomes `true`.
fn coerce_flag(value: &Option<Value>) -> bool {
    value.as_ref().map(truthy).unwrap_or(false)
}

/// A scalar becomes a singleton list, a falsy or absent value an empty one.
/// List entries that are not usable ids are dropped.
fn coerce_editor_ids(value: &Option<Value>) -> Vec<i64> {
    match value {
        Some(Value::Array(values)) => values.iter().filter_map(value_to_id).collect(),
        Some(value) if truthy(value) => value_to_id(value).into_iter().collect(),
        _ => Vec::new(),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(a) => !a.is_empty(),
        Value::Object(_) => true,
    }
}

fn value_to_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use common::{
        entities::{user::User, user_group::UserGroup},
        repository::test_repository::TestRepository,
    };
    use serde_json::json;

    use super::*;

    pub fn test_issue(id: i64, is_open: Option<bool>) -> Issue {
        Issue {
            id,
            context_id: 1,
            volume: Some(1),
            number: Some(id.to_string()),
            year: Some(2024),
            title: None,
            published: false,
            is_open,
            edited_by: None,
            last_modified: 0,
        }
    }

    fn service(repos: &AppRepositories) -> IssueService {
        IssueService::new(repos)
    }

    #[actix_web::test]
    async fn only_strictly_open_unpublished_issues_are_eligible() {
        let repos = AppRepositories::test();

        let mut published = test_issue(1, Some(true));
        published.published = true;
        repos.issues.save(&published).await.unwrap();
        repos.issues.save(&test_issue(2, Some(true))).await.unwrap();
        repos.issues.save(&test_issue(3, Some(false))).await.unwrap();
        repos.issues.save(&test_issue(4, None)).await.unwrap();

        let open = service(&repos).open_future_issues(1).await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, 2);
    }

    #[actix_web::test]
    async fn form_save_round_trips_values() {
        let repos = AppRepositories::test();
        let service = service(&repos);

        let input = IssueFormInput {
            is_open: Some(json!(true)),
            edited_by: Some(json!([5, 9])),
        };
        service.save_form(test_issue(7, None), &input).await.unwrap();

        let reloaded = repos.issues.find(7).await.unwrap().unwrap();
        assert_eq!(reloaded.is_open, Some(true));
        assert_eq!(reloaded.edited_by, Some(vec![5, 9]));
    }

    #[actix_web::test]
    async fn scalar_editor_value_becomes_singleton_list() {
        let repos = AppRepositories::test();
        let service = service(&repos);

        let input = IssueFormInput {
            is_open: Some(json!("1")),
            edited_by: Some(json!("9")),
        };
        let issue = service.save_form(test_issue(8, None), &input).await.unwrap();
        assert_eq!(issue.is_open, Some(true));
        assert_eq!(issue.edited_by, Some(vec![9]));

        let input = IssueFormInput {
            is_open: Some(json!(0)),
            edited_by: None,
        };
        let issue = service.save_form(test_issue(9, None), &input).await.unwrap();
        assert_eq!(issue.is_open, Some(false));
        assert_eq!(issue.edited_by, Some(vec![]));
    }

    #[actix_web::test]
    async fn form_data_defaults_for_new_or_unknown_issues() {
        let repos = AppRepositories::test();
        let service = service(&repos);

        let data = service.form_data(1, None).await.unwrap();
        assert!(!data.is_open);
        assert!(data.edited_by.is_empty());

        // an id that resolves to nothing renders like a new issue
        let data = service.form_data(1, Some(404)).await.unwrap();
        assert!(!data.is_open);
        assert!(data.edited_by.is_empty());
    }

    #[actix_web::test]
    async fn form_data_surfaces_stored_values() {
        let repos = AppRepositories::test();
        let service = service(&repos);

        let mut issue = test_issue(7, Some(true));
        issue.edited_by = Some(vec![5, 9]);
        repos.issues.save(&issue).await.unwrap();

        let data = service.form_data(1, Some(7)).await.unwrap();
        assert!(data.is_open);
        assert_eq!(data.edited_by, vec![5, 9]);
        assert!(data.editor_options.is_empty());
    }

    #[actix_web::test]
    async fn edit_with_unset_fields_preserves_previous_values() {
        let repos = AppRepositories::test();
        let service = service(&repos);

        let mut previous = test_issue(5, Some(true));
        previous.edited_by = Some(vec![5]);
        repos.issues.save(&previous).await.unwrap();

        let edited = test_issue(5, None);
        let reconciled = service.preserve_on_edit(edited, &previous).await.unwrap();
        assert_eq!(reconciled.is_open, Some(true));
        assert_eq!(reconciled.edited_by, Some(vec![5]));

        let stored = repos.issues.find(5).await.unwrap().unwrap();
        assert_eq!(stored.is_open, Some(true));
        assert_eq!(stored.edited_by, Some(vec![5]));
    }

    #[actix_web::test]
    async fn edit_with_set_fields_keeps_the_new_values() {
        let repos = AppRepositories::test();
        let service = service(&repos);

        let mut previous = test_issue(6, Some(true));
        previous.edited_by = Some(vec![5]);

        let mut edited = test_issue(6, Some(false));
        edited.edited_by = Some(vec![]);
        let reconciled = service.preserve_on_edit(edited, &previous).await.unwrap();
        assert_eq!(reconciled.is_open, Some(false));
        assert_eq!(reconciled.edited_by, Some(vec![]));
    }

    #[actix_web::test]
    async fn editor_options_deduplicate_users_across_groups() {
        let repos = AppRepositories::test();

        for (id, name) in [(7, "Greta"), (8, "Paul")] {
            repos
                .users
                .insert(&User {
                    id,
                    given_name: name.to_string(),
                    family_name: "Editor".to_string(),
                    last_modified: 0,
                })
                .await
                .unwrap();
        }
        repos
            .user_groups
            .insert(&UserGroup {
                id: 1,
                context_id: 1,
                role: Role::Manager,
                members: vec![7, 99],
                last_modified: 0,
            })
            .await
            .unwrap();
        repos
            .user_groups
            .insert(&UserGroup {
                id: 2,
                context_id: 1,
                role: Role::SubEditor,
                members: vec![7, 8],
                last_modified: 0,
            })
            .await
            .unwrap();

        let options = service(&repos).editor_options(1).await.unwrap();
        // user 99 does not resolve, user 7 appears once
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].value, 7);
        assert_eq!(options[0].label, "Greta Editor");
        assert_eq!(options[1].value, 8);
    }
}
