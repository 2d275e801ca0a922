//! Static content of the About page

/// Content of the About page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutContent {
    pub title: &'static str,
    pub photo_src: &'static str,
    pub photo_alt: &'static str,
    pub photo_credit: &'static str,
    pub photo_credit_url: &'static str,
    pub bio: &'static [&'static str],
}

pub static ABOUT: AboutContent = AboutContent {
    title: "About",
    photo_src: "/images/about/scan48439.jpg",
    photo_alt: "Eric Mercer looking to the side at Joshua Tree National Park while holding a Fuji Natura Classica film camera",
    photo_credit: "Erika Johnson",
    photo_credit_url: "https://erikaoutsider.com/",
    bio: &[
        "Hi, I'm Eric. I'm a Seattle-based photographer trying my hand at shooting film.",
        "With film, I find it easier to balance taking photos with being fully present in the moment. \
         A film roll only holds space for a few photos, inspiring equal bouts of spontaneity and careful deliberation. \
         Line up a shot, release the shutter, and move on. There is no pause to review; the film won't be developed until days or weeks later. \
         Maybe the scene was captured, maybe it was lost. Either way, the moment is still here to be experienced.",
        "In my free time, I enjoy brewing espresso, traveling, and hiking with my partner Erika.",
        "All photos are unedited from the original film scans.",
    ],
};
