//! Telegram Bot API access

pub mod client;

pub use client::{
    DocumentAttachment, REPORT_CAPTION, REPORT_CONTENT_TYPE, REPORT_FILENAME,
    SEND_FAILED_FALLBACK, TelegramApiResponse, TelegramClient, build_send_document_form,
};
