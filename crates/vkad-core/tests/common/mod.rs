pub mod vk_server;
