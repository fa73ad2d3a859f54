use std::collections::BTreeMap;

use common::{
    api::{
        form::{FieldOption, FormConfig, FormField, FIELD_SELECT},
        hook::ValidationErrors,
        schema::{Property, Schema},
    },
    entities::{
        issue::Issue, role::ASSIGNMENT_ROLE_PRIORITY, stage_assignment::StageAssignment,
        submission::Submission, user_group::UserGroup,
    },
    error,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    constants::{
        COMMENTS_FOR_EDITORS_FORM, DEFAULT_FIELD_GROUP, MSG_ERROR_ISSUE_REQUIRED,
        MSG_ISSUE_FIELD_DESCRIPTION, MSG_ISSUE_LABEL, MSG_SELECT_OPTION,
        SUBMISSION_PRESELECTED_ISSUE_ID,
    },
    repositories::{
        publication::PublicationRepo, stage_assignment::StageAssignmentRepo,
        submission::SubmissionRepo, user::UserRepo, user_group::UserGroupRepo,
    },
    service::issue::IssueService,
    AppRepositories,
};

lazy_static! {
    static ref SUBMISSION_ACTION: Regex = Regex::new(r"submissions/(\d+)").unwrap();
}

/// Data for the wizard's final review panel: the chosen issue id (0 when
/// nothing valid is chosen) and an id -> identification map so the client
/// resolves the label without another request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPanel {
    pub selected_issue_id: i64,
    pub labels: BTreeMap<i64, String>,
    pub missing: bool,
}

pub struct SubmissionService {
    issues: IssueService,
    submissions: SubmissionRepo,
    publications: PublicationRepo,
    users: UserRepo,
    user_groups: UserGroupRepo,
    stage_assignments: StageAssignmentRepo,
}

impl SubmissionService {
    pub fn new(repos: &AppRepositories) -> Self {
        Self {
            issues: IssueService::new(repos),
            submissions: repos.submissions.clone(),
            publications: repos.publications.clone(),
            users: repos.users.clone(),
            user_groups: repos.user_groups.clone(),
            stage_assignments: repos.stage_assignments.clone(),
        }
    }

    /// Declares `preselectedIssueId` on the submission entity, visible in
    /// API summaries and writable.
    pub fn extend_schema(schema: &mut Schema) {
        schema.properties.insert(
            SUBMISSION_PRESELECTED_ISSUE_ID.to_string(),
            Property::integer().nullable().api_summary(true).writable(),
        );
    }

    /// Includes the selection when submissions are serialized for lists.
    pub fn extend_list_props(props: &mut Vec<String>) {
        props.push(SUBMISSION_PRESELECTED_ISSUE_ID.to_string());
    }

    /// Injects the issue select control into the "comments for the editors"
    /// form. Leaves every other form, and any form whose action URL does not
    /// name a known submission, untouched.
    pub async fn inject_issue_field(&self, config: &mut FormConfig) -> error::Result<()> {
        if config.id != COMMENTS_FOR_EDITORS_FORM {
            return Ok(());
        }

        let Some(captures) = SUBMISSION_ACTION.captures(&config.action) else {
            return Ok(());
        };
        // a digit run too long for an id is as unusable as no id at all
        let Ok(submission_id) = captures[1].parse::<i64>() else {
            return Ok(());
        };

        let Some(submission) = self.submissions.find(submission_id).await? else {
            return Ok(());
        };

        let open_issues = self.issues.open_future_issues(submission.context_id).await?;
        if open_issues.is_empty() {
            return Ok(());
        }

        let mut options = vec![FieldOption {
            value: 0,
            label: MSG_SELECT_OPTION.to_string(),
        }];
        options.extend(open_issues.iter().map(|issue| FieldOption {
            value: issue.id,
            label: issue.identification(),
        }));

        let current = submission.selected_issue_id();
        config.fields.push(FormField {
            name: SUBMISSION_PRESELECTED_ISSUE_ID.to_string(),
            component: FIELD_SELECT.to_string(),
            label: MSG_ISSUE_LABEL.to_string(),
            description: Some(MSG_ISSUE_FIELD_DESCRIPTION.to_string()),
            options,
            value: json!(current),
            is_required: true,
            group_id: DEFAULT_FIELD_GROUP.to_string(),
            rest: serde_json::Map::new(),
        });
        config
            .values
            .insert(SUBMISSION_PRESELECTED_ISSUE_ID.to_string(), json!(current));

        Ok(())
    }

    /// Review-step panel for a submission. Empty when the panel's locale is
    /// not the submission's own (the wizard renders one panel per locale
    /// variant) or when the context has no open issues.
    pub async fn review_panel(
        &self,
        submission_id: i64,
        locale_key: &str,
    ) -> error::Result<Option<ReviewPanel>> {
        let Some(submission) = self.submissions.find(submission_id).await? else {
            return Ok(None);
        };
        if submission.locale != locale_key {
            return Ok(None);
        }

        let open_issues = self.issues.open_future_issues(submission.context_id).await?;
        if open_issues.is_empty() {
            return Ok(None);
        }

        let labels = open_issues
            .iter()
            .map(|issue| (issue.id, issue.identification()))
            .collect();
        let selected = submission.selected_issue_id();

        Ok(Some(ReviewPanel {
            selected_issue_id: selected,
            labels,
            missing: selected == 0,
        }))
    }

    /// Submission-time validation and binding. Returns the field errors the
    /// host merges into its own validation result; binding failures are
    /// logged and swallowed so the submission itself still goes through.
    pub async fn validate_submit(&self, submission: &Submission) -> error::Result<ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let selection = submission.selected_issue_id();
        let open_issues = self.issues.open_future_issues(submission.context_id).await?;

        if !open_issues.is_empty() && selection == 0 {
            errors.insert(
                SUBMISSION_PRESELECTED_ISSUE_ID.to_string(),
                vec![MSG_ERROR_ISSUE_REQUIRED.to_string()],
            );
            return Ok(errors);
        }

        if selection == 0 {
            return Ok(errors);
        }

        let Some(issue) = self.issues.find(selection).await? else {
            return Ok(errors);
        };
        // The issue may have closed between form display and submission.
        if !issue.is_open_for_submission() {
            log::info!(
                "issue {} closed before submission {} was validated, skipping binding",
                issue.id,
                submission.id,
            );
            return Ok(errors);
        }

        if let Err(err) = self.bind_issue(submission, &issue).await {
            log::error!(
                "failed to bind issue {} to submission {}: {}",
                issue.id,
                submission.id,
                err,
            );
        }

        Ok(errors)
    }

    /// Points the submission's current publication at the issue, then
    /// assigns the issue's designated editors.
    async fn bind_issue(&self, submission: &Submission, issue: &Issue) -> anyhow::Result<()> {
        let Some(mut publication) = self.publications.by_submission(submission.id).await? else {
            return Ok(());
        };

        publication.issue_id = Some(issue.id);
        publication.last_modified = common::default_timestamp();
        self.publications.update(&publication).await?;
        log::info!(
            "scheduled submission {} for issue {}",
            submission.id,
            issue.id
        );

        if let Some(editor_ids) = &issue.edited_by {
            self.assign_editors(submission, editor_ids).await?;
        }

        Ok(())
    }

    async fn assign_editors(
        &self,
        submission: &Submission,
        editor_ids: &[i64],
    ) -> anyhow::Result<()> {
        for &editor_id in editor_ids {
            if self.users.find(editor_id).await?.is_none() {
                log::warn!("skipping unknown editor {}", editor_id);
                continue;
            }

            let Some(group) = self
                .editor_group(submission.context_id, editor_id)
                .await?
            else {
                log::warn!(
                    "editor {} has no editorial group in context {}, skipping",
                    editor_id,
                    submission.context_id,
                );
                continue;
            };

            if self
                .stage_assignments
                .exists(submission.id, editor_id, group.id)
                .await?
            {
                continue;
            }

            let assignment = StageAssignment::new(submission.id, editor_id, group.id);
            self.stage_assignments.insert(&assignment).await?;
            log::info!(
                "assigned editor {} (group {}) to submission {}",
                editor_id,
                group.id,
                submission.id,
            );
        }
        Ok(())
    }

    /// The group an editor is assigned under, following the ordered role
    /// preference (sub-editor first, then manager).
    async fn editor_group(
        &self,
        context_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Option<UserGroup>> {
        let groups = self.user_groups.by_context(context_id).await?;
        for role in ASSIGNMENT_ROLE_PRIORITY {
            if let Some(group) = groups
                .iter()
                .find(|g| g.role == role && g.has_member(user_id))
            {
                return Ok(Some(group.clone()));
            }
        }
        Ok(None)
    }
}
