use askama::Template;

use crate::directory::Person;

#[derive(Template)]
#[template(path = "search.html")]
pub(crate) struct Search<'a> {
    pub(crate) input_id: &'a str,
    pub(crate) results_id: &'a str,
    pub(crate) search_url: &'a str
}

#[derive(Template)]
#[template(path = "live_results.html")]
pub(crate) struct LiveResults<'a> {
    pub(crate) people: Vec<&'a Person>
}
