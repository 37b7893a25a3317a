// SPDX-License-Identifier: Apache-2.0
//
// Page-side assets: scripts injected into the embedded surface and the
// static offline document.
//
// The shell owns every string that crosses into script context so that the
// host layer never assembles JavaScript by hand.

use skiff_core::types::PermissionStatus;

/// Prefix for host-reserved control signals arriving on the ipc channel.
/// These are not bridge messages; the page-facing message set stays closed.
pub const CONTROL_PREFIX: &str = "__shell:";

/// Control signal posted by the onboarding overlay's accept button.
pub const ONBOARDING_ACCEPT_SIGNAL: &str = "__shell:onboarding-accept";

/// Injected at document start: installs the bridge entry points and the
/// viewport meta tag. Zoom stays enabled for accessibility.
pub const INIT_SCRIPT: &str = r#"
(function () {
  window.__bridgePost = function (name, body) {
    window.ipc.postMessage(JSON.stringify({
      name: name,
      body: body === undefined ? null : body
    }));
  };
  Notification.requestPermission = function () {
    window.__bridgePost('notifyPermission');
    return Promise.resolve(Notification.permission);
  };
  window.openCamera = function () {
    window.__bridgePost('openCamera');
  };
  var meta = document.createElement('meta');
  meta.name = 'viewport';
  meta.content = 'width=device-width, initial-scale=1.0';
  document.head.appendChild(meta);
})();
"#;

/// Static document substituted when the initial page load fails.
pub const OFFLINE_HTML: &str = r#"<html><body style="font-family: system-ui, sans-serif; text-align: center; padding-top: 50px;">
<h1>You're Offline</h1>
<p>Please check your internet connection.</p>
</body></html>"#;

/// Script hiding the transient offline banner.
pub const BANNER_HIDE_JS: &str = r#"
(function () {
  var banner = document.getElementById('skiff-offline-banner');
  if (banner) { banner.remove(); }
})();
"#;

/// Script hiding the onboarding overlay.
pub const ONBOARDING_HIDE_JS: &str = r#"
(function () {
  var overlay = document.getElementById('skiff-onboarding');
  if (overlay) { overlay.remove(); }
})();
"#;

/// Post-load announcement letting the page detect the native shell.
pub fn native_flags_js(user_agent: &str) -> String {
    format!(
        "window.__isNativeApp = true; window.__appUserAgent = '{}';",
        js_quote(user_agent)
    )
}

/// The fixed page-side callback carrying a permission result. Invoked at
/// most once per `notifyPermission` request.
pub fn permission_callback_js(status: PermissionStatus) -> String {
    format!(
        "window._notificationPermissionCallback && window._notificationPermissionCallback('{}');",
        status.as_str()
    )
}

/// Script raising the transient offline banner as an injected DOM strip.
pub fn banner_show_js(message: &str) -> String {
    format!(
        r#"
(function () {{
  if (document.getElementById('skiff-offline-banner')) {{ return; }}
  var banner = document.createElement('div');
  banner.id = 'skiff-offline-banner';
  banner.textContent = '{}';
  banner.style.cssText = 'position:fixed;top:0;left:0;right:0;z-index:2147483646;' +
    'background:#f5c518;color:#000;text-align:center;padding:6px 12px;font-family:system-ui,sans-serif;';
  document.body.appendChild(banner);
}})();
"#,
        js_quote(message)
    )
}

/// Script raising the full-screen onboarding overlay. The accept button
/// posts on the host's reserved control channel.
pub fn onboarding_show_js(title: &str, body: &str, accept_label: &str) -> String {
    format!(
        r#"
(function () {{
  if (document.getElementById('skiff-onboarding')) {{ return; }}
  var overlay = document.createElement('div');
  overlay.id = 'skiff-onboarding';
  overlay.style.cssText = 'position:fixed;inset:0;z-index:2147483647;background:rgba(0,0,0,0.88);' +
    'display:flex;flex-direction:column;align-items:center;justify-content:center;' +
    'color:#fff;font-family:system-ui,sans-serif;text-align:center;padding:32px;';
  var title = document.createElement('h1');
  title.textContent = '{title}';
  var body = document.createElement('p');
  body.textContent = '{body}';
  var button = document.createElement('button');
  button.textContent = '{accept}';
  button.style.cssText = 'margin-top:24px;padding:12px 32px;border:none;border-radius:16px;' +
    'background:#7b2ff7;color:#fff;font-size:16px;';
  button.addEventListener('click', function () {{
    window.ipc.postMessage('{signal}');
  }});
  overlay.appendChild(title);
  overlay.appendChild(body);
  overlay.appendChild(button);
  document.body.appendChild(overlay);
}})();
"#,
        title = js_quote(title),
        body = js_quote(body),
        accept = js_quote(accept_label),
        signal = ONBOARDING_ACCEPT_SIGNAL,
    )
}

/// Escape a string for inclusion inside a single-quoted JS literal.
fn js_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}
