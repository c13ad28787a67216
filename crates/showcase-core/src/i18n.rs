//! User-facing message catalog.
//!
//! Components carry [`Message`] keys; the text is looked up at render time in
//! the selected [`Language`].

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
  #[default]
  En,
  Ar,
}

impl Language {
  pub fn toggled(self) -> Self {
    match self {
      Self::En => Self::Ar,
      Self::Ar => Self::En,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
  LoginRequired,
  InsufficientPermissions,
  AccountDeactivated,
  CompleteProfile,
  Loading,
  ProjectStarred,
  ProjectUnstarred,
  CommentAdded,
  CommentDeleted,
  StatusUpdated,
  RoleUpdated,
  UserDeactivated,
  UserReactivated,
  SuggestionSent,
  Deleted,
  LoggedOut,
}

impl Message {
  pub fn text(self, lang: Language) -> &'static str {
    match lang {
      Language::En => self.en(),
      Language::Ar => self.ar(),
    }
  }

  fn en(self) -> &'static str {
    match self {
      Self::LoginRequired => "Please sign in to continue",
      Self::InsufficientPermissions => "You do not have permission to view this page",
      Self::AccountDeactivated => "Your account has been deactivated",
      Self::CompleteProfile => "Please complete your profile first",
      Self::Loading => "Loading…",
      Self::ProjectStarred => "Project starred",
      Self::ProjectUnstarred => "Project removed from stars",
      Self::CommentAdded => "Comment added",
      Self::CommentDeleted => "Comment deleted",
      Self::StatusUpdated => "Project status updated",
      Self::RoleUpdated => "Role updated",
      Self::UserDeactivated => "User deactivated",
      Self::UserReactivated => "User reactivated",
      Self::SuggestionSent => "Thanks! Your report was sent",
      Self::Deleted => "Deleted",
      Self::LoggedOut => "Signed out",
    }
  }

  fn ar(self) -> &'static str {
    match self {
      Self::LoginRequired => "يرجى تسجيل الدخول للمتابعة",
      Self::InsufficientPermissions => "ليس لديك صلاحية لعرض هذه الصفحة",
      Self::AccountDeactivated => "تم تعطيل حسابك",
      Self::CompleteProfile => "يرجى إكمال ملفك الشخصي أولاً",
      Self::Loading => "جارٍ التحميل…",
      Self::ProjectStarred => "تمت إضافة المشروع إلى المفضلة",
      Self::ProjectUnstarred => "تمت إزالة المشروع من المفضلة",
      Self::CommentAdded => "تمت إضافة التعليق",
      Self::CommentDeleted => "تم حذف التعليق",
      Self::StatusUpdated => "تم تحديث حالة المشروع",
      Self::RoleUpdated => "تم تحديث الدور",
      Self::UserDeactivated => "تم تعطيل المستخدم",
      Self::UserReactivated => "تمت إعادة تفعيل المستخدم",
      Self::SuggestionSent => "شكراً! تم إرسال بلاغك",
      Self::Deleted => "تم الحذف",
      Self::LoggedOut => "تم تسجيل الخروج",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn toggle_round_trips() {
    assert_eq!(Language::En.toggled(), Language::Ar);
    assert_eq!(Language::En.toggled().toggled(), Language::En);
  }

  #[test]
  fn catalog_differs_per_language() {
    let en = Message::InsufficientPermissions.text(Language::En);
    let ar = Message::InsufficientPermissions.text(Language::Ar);
    assert_ne!(en, ar);
    assert!(en.contains("permission"));
  }
}
