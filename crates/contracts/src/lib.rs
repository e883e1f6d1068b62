//! Общие DTO между фронтендом и сервисом генерации документов.

pub mod usecases;
