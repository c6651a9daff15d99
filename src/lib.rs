
pub mod models {
    pub mod error;
    pub mod job;
}

pub mod config {
    pub mod config;
    pub mod ports;
}

pub mod service {
    pub mod traits {
        pub mod i_service;
    }
    pub mod config_service;
    pub mod converter;
    pub mod zip;
}

pub mod facade {
    pub mod traits {
        pub mod i_conversion;
    }
    pub mod conversion_facade;
    pub mod worker;
}

pub mod action {
    pub mod cli;
    pub mod interactive;
}

pub mod utils {
    pub mod convert;
    pub mod file;
    pub mod utils;
}
