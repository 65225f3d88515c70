use cookie::Cookie;

/// Cookie 读取特性
///
/// 浏览器端读取 `document.cookie`，原生端读取 reqwest 的 Cookie Jar。
pub trait CookieSource {
    /// 返回指定 Cookie 的值；不存在或为空时返回 `None`
    fn cookie(&self, name: &str) -> Option<String>;
}

/// 从 `a=1; b=2` 形式的 Cookie 串中取出 `name` 的值
///
/// 同名 Cookie 出现多次（不同 Path 下各有一份）时无法判断该用哪一个，按不存在处理。
pub fn read_cookie(cookies: &str, name: &str) -> Option<String> {
    let mut found = Cookie::split_parse(cookies)
        .flatten()
        .filter(|cookie| cookie.name() == name);

    let cookie = found.next()?;
    if found.next().is_some() {
        return None;
    }
    Some(cookie.value().to_string()).filter(|value| !value.is_empty())
}
