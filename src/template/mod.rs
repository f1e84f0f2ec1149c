//! Template assets and the search target abstraction.
//!
//! A search accepts either a path, loaded fresh on every call, or a
//! pre-decoded [`Template`] that callers keep around to skip decoding.

use crate::image::io::{gray_from_rgba, load_gray_image, owned_from_dynamic_image};
use crate::image::{ImageView, OwnedImage};
use crate::util::VisautoResult;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

mod plan;

pub use plan::TemplatePlan;

/// Owned grayscale template with its asset name and correlation plan.
#[derive(Clone, Debug)]
pub struct Template {
    name: String,
    img: OwnedImage,
    plan: TemplatePlan,
}

impl Template {
    /// Creates a template from a contiguous grayscale buffer.
    pub fn new(
        name: impl Into<String>,
        data: Vec<u8>,
        width: usize,
        height: usize,
    ) -> VisautoResult<Self> {
        Self::from_owned(name, OwnedImage::new(data, width, height)?)
    }

    /// Loads a template from an image file; the path becomes its name.
    pub fn open<P: AsRef<Path>>(path: P) -> VisautoResult<Self> {
        let path = path.as_ref();
        Self::from_owned(path.display().to_string(), load_gray_image(path)?)
    }

    /// Creates a template from an RGBA buffer, e.g. a crop of a capture.
    pub fn from_rgba(name: impl Into<String>, img: &image::RgbaImage) -> VisautoResult<Self> {
        Self::from_owned(name, gray_from_rgba(img)?)
    }

    /// Creates a template from any decoded image.
    pub fn from_dynamic(name: impl Into<String>, img: &image::DynamicImage) -> VisautoResult<Self> {
        Self::from_owned(name, owned_from_dynamic_image(img)?)
    }

    fn from_owned(name: impl Into<String>, img: OwnedImage) -> VisautoResult<Self> {
        let plan = TemplatePlan::from_view(img.view())?;
        Ok(Self {
            name: name.into(),
            img,
            plan,
        })
    }

    /// Returns the asset name reported on matches.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> usize {
        self.img.width()
    }

    pub fn height(&self) -> usize {
        self.img.height()
    }

    /// Returns a borrowed view of the template data.
    pub fn view(&self) -> ImageView<'_> {
        self.img.view()
    }

    /// Returns the precomputed correlation plan.
    pub fn plan(&self) -> &TemplatePlan {
        &self.plan
    }
}

/// What a search looks for.
#[derive(Clone, Copy, Debug)]
pub enum Target<'a> {
    /// An image file decoded on every search.
    Path(&'a Path),
    /// A template decoded ahead of time.
    Template(&'a Template),
}

impl<'a> Target<'a> {
    /// Name reported on matches and errors.
    pub fn name(&self) -> String {
        match self {
            Target::Path(path) => path.display().to_string(),
            Target::Template(tpl) => tpl.name().to_owned(),
        }
    }

    pub(crate) fn load(self) -> VisautoResult<Cow<'a, Template>> {
        match self {
            Target::Path(path) => Template::open(path).map(Cow::Owned),
            Target::Template(tpl) => Ok(Cow::Borrowed(tpl)),
        }
    }
}

impl<'a> From<&'a str> for Target<'a> {
    fn from(path: &'a str) -> Self {
        Target::Path(Path::new(path))
    }
}

impl<'a> From<&'a String> for Target<'a> {
    fn from(path: &'a String) -> Self {
        Target::Path(Path::new(path))
    }
}

impl<'a> From<&'a Path> for Target<'a> {
    fn from(path: &'a Path) -> Self {
        Target::Path(path)
    }
}

impl<'a> From<&'a PathBuf> for Target<'a> {
    fn from(path: &'a PathBuf) -> Self {
        Target::Path(path.as_path())
    }
}

impl<'a> From<&'a Template> for Target<'a> {
    fn from(tpl: &'a Template) -> Self {
        Target::Template(tpl)
    }
}

#[cfg(test)]
mod tests {
    use super::{Target, Template};
    use crate::VisautoError;
    use std::path::Path;

    #[test]
    fn template_keeps_name_and_plan() {
        let tpl = Template::new("button", vec![0, 10, 20, 30, 40, 50], 3, 2).unwrap();
        assert_eq!(tpl.name(), "button");
        assert_eq!((tpl.width(), tpl.height()), (3, 2));
        assert_eq!(tpl.plan().width(), 3);
        assert!(!tpl.plan().is_flat());
    }

    #[test]
    fn path_target_reports_path_and_fails_to_load_distinctly() {
        let target = Target::from("assets/missing.png");
        assert_eq!(target.name(), Path::new("assets/missing.png").display().to_string());
        assert!(matches!(
            target.load().unwrap_err(),
            VisautoError::AssetLoad { .. }
        ));
    }
}
