use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware, web, App,
};
use common::repository::{mongo_repository::MongoRepository, test_repository::TestRepository};

pub mod constants;
pub mod handlers;
pub mod repositories;
pub mod service;

use handlers::{
    issue::{issue_edit, issue_form, issue_form_fields, issue_form_save, issue_schema, open_issues},
    ping::ping,
    submission::{
        submission_form, submission_list_props, submission_review, submission_schema,
        submission_validate,
    },
};
use repositories::{
    issue::IssueRepo, publication::PublicationRepo, stage_assignment::StageAssignmentRepo,
    submission::SubmissionRepo, user::UserRepo, user_group::UserGroupRepo,
};

pub const API_PREFIX: &str = "/api";

/// The repositories every hook handler works against. The host's entities
/// are reached through these, never through any global state.
#[derive(Clone)]
pub struct AppRepositories {
    pub issues: IssueRepo,
    pub submissions: SubmissionRepo,
    pub publications: PublicationRepo,
    pub users: UserRepo,
    pub user_groups: UserGroupRepo,
    pub stage_assignments: StageAssignmentRepo,
}

impl AppRepositories {
    pub async fn mongo(mongo_uri: &str, database: &str) -> Self {
        Self {
            issues: IssueRepo::new(MongoRepository::new(mongo_uri, database, "issues").await),
            submissions: SubmissionRepo::new(
                MongoRepository::new(mongo_uri, database, "submissions").await,
            ),
            publications: PublicationRepo::new(
                MongoRepository::new(mongo_uri, database, "publications").await,
            ),
            users: UserRepo::new(MongoRepository::new(mongo_uri, database, "users").await),
            user_groups: UserGroupRepo::new(
                MongoRepository::new(mongo_uri, database, "user_groups").await,
            ),
            stage_assignments: StageAssignmentRepo::new(
                MongoRepository::new(mongo_uri, database, "stage_assignments").await,
            ),
        }
    }

    /// In-memory repositories for tests.
    pub fn test() -> Self {
        Self {
            issues: IssueRepo::new(TestRepository::new()),
            submissions: SubmissionRepo::new(TestRepository::new()),
            publications: PublicationRepo::new(TestRepository::new()),
            users: UserRepo::new(TestRepository::new()),
            user_groups: UserGroupRepo::new(TestRepository::new()),
            stage_assignments: StageAssignmentRepo::new(TestRepository::new()),
        }
    }
}

pub fn create_app(
    repos: AppRepositories,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = actix_web::Error,
    >,
> {
    let cors = Cors::permissive();

    #[allow(clippy::let_and_return)]
    let app = App::new()
        .wrap(cors)
        .wrap(middleware::Logger::default())
        .app_data(web::Data::new(repos))
        .service(
            web::scope(API_PREFIX)
                .service(issue_schema)
                .service(issue_form)
                .service(issue_form_fields)
                .service(issue_form_save)
                .service(issue_edit)
                .service(open_issues)
                .service(submission_schema)
                .service(submission_list_props)
                .service(submission_form)
                .service(submission_review)
                .service(submission_validate)
                .service(ping),
        );
    app
}
