#![allow(dead_code, unreachable_pub)]

use mosaic_kernel::prelude::*;
use serde_json::Value;

/// A module whose declaration and routes are supplied by the test.
#[derive(Debug)]
pub struct TestModule {
    pub config: Value,
    pub routes: Vec<RouteNode>,
}

impl ServiceModule for TestModule {
    fn raw_config(&self) -> Result<Value, KernelError> {
        Ok(self.config.clone())
    }

    fn routes(&self) -> Vec<RouteNode> {
        self.routes.clone()
    }
}

pub fn module(config: Value) -> Result<Box<dyn ServiceModule>, KernelError> {
    Ok(Box::new(TestModule { config, routes: vec![RouteNode::index()] }))
}

pub fn origin() -> RequestOrigin {
    RequestOrigin::parse("https://example.com").unwrap()
}
