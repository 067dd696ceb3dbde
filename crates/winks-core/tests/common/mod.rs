#![allow(dead_code)]

pub mod rest_server;
