pub mod api_dto;
pub mod job_dto;
