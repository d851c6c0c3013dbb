use super::Slice;
use crate::filter::keys;
use crate::model::Article;
use crate::CoreResult;

/// Articles page actions.
///
/// Category and search are independent criteria, so choosing a category keeps the current
/// search text and vice versa.
#[derive(Clone, Debug)]
pub enum ArticleAction {
    SetArticles(Vec<Article>),
    SetCategory(String),
    Search(String),
    /// Newest first: the article goes to the top of the list.
    AddArticle(Article),
    SetLoading(bool),
    SetError(Option<String>),
}

pub(super) fn reduce(slice: &mut Slice<Article>, action: ArticleAction) -> CoreResult<()> {
    match action {
        ArticleAction::SetArticles(articles) => slice.replace_items(articles)?,
        ArticleAction::SetCategory(value) => slice.set_filter(keys::CATEGORY, value),
        ArticleAction::Search(value) => slice.set_filter(keys::QUERY, value),
        ArticleAction::AddArticle(article) => slice.prepend(article)?,
        ArticleAction::SetLoading(loading) => slice.loading = loading,
        ArticleAction::SetError(error) => slice.error = error,
    }
    Ok(())
}
