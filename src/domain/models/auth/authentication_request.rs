//! 보호된 라우트의 요구 권한

/// 액세스 토큰의 `authorities`에 반드시 있어야 하는 권한 (`READ:USER` 등)
#[derive(Debug, Clone, PartialEq)]
pub struct RequiredAuthority(pub String);

impl RequiredAuthority {
    pub fn is_satisfied(&self, granted: &[String]) -> bool {
        granted.contains(&self.0)
    }
}
