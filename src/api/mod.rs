pub mod dto;
pub mod memory;

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::db::SessionStore;
use crate::error::{AppError, ErrorResponse};
use crate::models::{
    Absence, Course, Homework, HomeworkUpload, LoginRequest, LoginResponse, Note, Parent,
    PersonSummary, QuestionDraft, Quiz, Rappel, Resource, Role, Seance, Subject, UserInfo,
    Validate,
};

pub use memory::InMemoryBackend;

/// Storage side of a canonical list: where records are fetched from and
/// written to.
#[async_trait]
pub trait ResourceBackend<R: Resource>: Send + Sync {
    async fn list(&self) -> Result<Vec<R>, AppError>;
    async fn create(&self, draft: &R::Draft) -> Result<R, AppError>;
    /// Sends the whole record.
    async fn update(&self, record: &R) -> Result<R, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
impl<R: Resource, B: ResourceBackend<R> + ?Sized> ResourceBackend<R> for Arc<B> {
    async fn list(&self) -> Result<Vec<R>, AppError> {
        (**self).list().await
    }

    async fn create(&self, draft: &R::Draft) -> Result<R, AppError> {
        (**self).create(draft).await
    }

    async fn update(&self, record: &R) -> Result<R, AppError> {
        (**self).update(record).await
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        (**self).delete(id).await
    }
}

/// Bearer token authenticated client for the LearnUp REST backend.
pub struct LearnUpHttpClient {
    client: Client,
    base_url: String,
    session: SessionStore,
}

impl LearnUpHttpClient {
    pub fn new(config: &AppConfig, session: SessionStore) -> Result<Self, AppError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder, AppError> {
        let token = self.session.token().await?.ok_or(AppError::Unauthorized)?;
        Ok(builder.header("Authorization", format!("Bearer {}", token)))
    }

    async fn check(response: Response) -> Result<Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|b| b.message.or(b.error));
        warn!("LearnUp API error {}: {}", status, body);
        Err(AppError::Api { status, message })
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, AppError> {
        let response = self.authorized(builder).await?.send().await?;
        let response = Self::check(response).await?;
        let payload = response.json::<dto::Payload<T>>().await?;
        Ok(payload.into_inner())
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        debug!("GET {}", path);
        self.send(self.client.get(self.url(path))).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("POST {}", path);
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("PUT {}", path);
        self.send(self.client.put(self.url(path)).json(body)).await
    }

    pub async fn delete_path(&self, path: &str) -> Result<(), AppError> {
        debug!("DELETE {}", path);
        let builder = self.authorized(self.client.delete(self.url(path))).await?;
        Self::check(builder.send().await?).await?;
        Ok(())
    }

    /// Role specific login. The token and profile are persisted to the
    /// session store on success.
    pub async fn login(&self, role: Role, email: &str, password: &str) -> Result<UserInfo, AppError> {
        let path = format!("/api/{}/login", role.login_segment());
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let response = self
            .client
            .post(self.url(&path))
            .json(&request)
            .send()
            .await?;
        let response = Self::check(response).await?;
        let body = response.json::<LoginResponse>().await?;

        let mut profile = body.user;
        if profile.email.is_empty() {
            profile.email = request.email.clone();
        }
        let info = UserInfo {
            role,
            token: body.token,
            profile,
        };
        self.session.save_login(&info).await?;
        info!("logged in as {} ({})", info.profile.email, role);
        Ok(info)
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        self.session.clear_login().await?;
        info!("session cleared");
        Ok(())
    }

    pub async fn teachers(&self) -> Result<Vec<PersonSummary>, AppError> {
        self.get_json("/api/admin/teachers").await
    }

    pub async fn subjects(&self) -> Result<Vec<Subject>, AppError> {
        self.get_json("/api/matieres").await
    }

    /// `None` when the chapter has no quiz yet.
    pub async fn quiz(&self, chapter_id: &str) -> Result<Option<Quiz>, AppError> {
        match self
            .get_json::<Quiz>(&format!("/api/quiz/chapitre/{}", chapter_id))
            .await
        {
            Ok(quiz) => Ok(Some(quiz)),
            Err(AppError::Api { status, .. }) if status == StatusCode::NOT_FOUND => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn add_question(
        &self,
        chapter_id: &str,
        draft: &QuestionDraft,
    ) -> Result<Quiz, AppError> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Champs invalides: {}",
                missing.join(", ")
            )));
        }
        let body = dto::AddQuestionRequest::from(draft);
        self.post_json(&format!("/api/quiz/chapitre/{}/question", chapter_id), &body)
            .await
    }

    pub async fn delete_question(&self, chapter_id: &str, question_id: &str) -> Result<(), AppError> {
        self.delete_path(&format!(
            "/api/quiz/chapitre/{}/question/{}",
            chapter_id, question_id
        ))
        .await
    }

    pub async fn upload_homework(
        &self,
        course_id: &str,
        upload: HomeworkUpload,
    ) -> Result<Homework, AppError> {
        let missing = upload.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Champs invalides: {}",
                missing.join(", ")
            )));
        }

        let mut file = Part::bytes(upload.bytes).file_name(upload.file_name);
        if let Some(content_type) = &upload.content_type {
            file = file.mime_str(content_type)?;
        }
        let mut form = Form::new()
            .text("title", upload.title)
            .text("description", upload.description)
            .part("file", file);
        if let Some(due) = upload.due_date {
            form = form.text("dueDate", due.format("%Y-%m-%d").to_string());
        }

        let path = format!("/api/courses/{}/devoirs", course_id);
        debug!("POST {} (multipart)", path);
        self.send(self.client.post(self.url(&path)).multipart(form))
            .await
    }
}

/// Endpoint set of one resource collection.
pub struct HttpResource<R> {
    api: Arc<LearnUpHttpClient>,
    list_path: String,
    collection_path: String,
    _marker: PhantomData<fn() -> R>,
}

impl<R> HttpResource<R> {
    /// `list_path` is fetched; writes go to `collection_path[/:id]`.
    pub fn new(api: Arc<LearnUpHttpClient>, list_path: String, collection_path: String) -> Self {
        Self {
            api,
            list_path,
            collection_path,
            _marker: PhantomData,
        }
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.collection_path, id)
    }
}

#[async_trait]
impl<R: Resource> ResourceBackend<R> for HttpResource<R> {
    async fn list(&self) -> Result<Vec<R>, AppError> {
        self.api.get_json(&self.list_path).await
    }

    async fn create(&self, draft: &R::Draft) -> Result<R, AppError> {
        self.api.post_json(&self.collection_path, draft).await
    }

    async fn update(&self, record: &R) -> Result<R, AppError> {
        self.api.put_json(&self.item_path(record.id()), record).await
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.api.delete_path(&self.item_path(id)).await
    }
}

fn collection<R>(api: &Arc<LearnUpHttpClient>, path: &str) -> HttpResource<R> {
    HttpResource::new(api.clone(), path.to_string(), path.to_string())
}

pub fn courses(api: &Arc<LearnUpHttpClient>) -> HttpResource<Course> {
    collection(api, "/api/courses")
}

pub fn parents(api: &Arc<LearnUpHttpClient>) -> HttpResource<Parent> {
    collection(api, "/api/admin/parents")
}

pub fn seances(api: &Arc<LearnUpHttpClient>) -> HttpResource<Seance> {
    collection(api, "/api/seances")
}

pub fn rappels(api: &Arc<LearnUpHttpClient>) -> HttpResource<Rappel> {
    collection(api, "/api/rappels")
}

pub fn student_notes(api: &Arc<LearnUpHttpClient>, student_id: &str) -> HttpResource<Note> {
    HttpResource::new(
        api.clone(),
        format!("/api/notes/etudiant/{}", student_id),
        "/api/notes".to_string(),
    )
}

pub fn student_absences(api: &Arc<LearnUpHttpClient>, student_id: &str) -> HttpResource<Absence> {
    HttpResource::new(
        api.clone(),
        format!("/api/absences/etudiant/{}", student_id),
        "/api/absences".to_string(),
    )
}
