use actix_web::{HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{LoginRequest, LoginResponse, RegisterRequest, UserResponse},
  errors::ApiError,
};
use crate::application::auth::{
  LoginUserCommand, LoginUserUseCase, RegisterUserCommand, RegisterUserUseCase,
};

/// Handler for user registration
///
/// POST /api/auth/register
/// Body: RegisterRequest (JSON)
/// Response: UserResponse (JSON) with status 201
pub async fn register_handler(
  request: web::Json<RegisterRequest>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let command = RegisterUserCommand {
    name: request.name.clone(),
    email: request.email.clone(),
    password: request.password.clone(),
    phone: request.phone.clone(),
  };

  let profile = use_case.execute(command).await?;

  Ok(HttpResponse::Created().json(UserResponse::from(profile)))
}

/// Handler for user login
///
/// POST /api/auth/login
/// Body: LoginRequest (JSON)
/// Response: LoginResponse (JSON) with status 200
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let command = LoginUserCommand {
    email: request.email.clone(),
    password: request.password.clone(),
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(LoginResponse {
    token: response.token,
    user: UserResponse::from(response.user),
  }))
}
