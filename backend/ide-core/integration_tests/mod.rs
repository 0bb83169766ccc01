mod helpers;

mod messaging_server;
mod metadata;
