//! Builders for records and canned server responses.

#![allow(dead_code)]

use serde_json::json;

use cmsadmin::{CaseStudy, Job, Product};

pub fn job(title: &str, quota: &str) -> Job {
    Job {
        title: title.to_string(),
        quota: quota.to_string(),
        salary_start: "5000".to_string(),
        salary_end: "8000".to_string(),
        requirements: vec!["Team player".to_string()],
    }
}

pub fn product(name: &str) -> Product {
    Product {
        name: name.to_string(),
        category: "水处理".to_string(),
        description: format!("{} description", name),
        image_urls: Vec::new(),
    }
}

pub fn case_study(title: &str) -> CaseStudy {
    CaseStudy {
        title: title.to_string(),
        description: String::new(),
        image_urls: Vec::new(),
    }
}

pub fn success(message: &str) -> String {
    json!({ "status": "success", "message": message }).to_string()
}

pub fn error(message: &str) -> String {
    json!({ "status": "error", "message": message }).to_string()
}

pub fn login_ok(key: &str, username: &str) -> String {
    json!({ "status": "success", "session_key": key, "username": username }).to_string()
}

pub fn upload_ok(url: &str) -> String {
    json!({ "status": "success", "url": url }).to_string()
}

pub fn data(data: serde_json::Value) -> String {
    json!({ "status": "success", "data": data }).to_string()
}
