mod frontend_controller;
mod member_card;
mod member_form;
pub(crate) mod server;
