//! Print static deployment instructions

/// Instructions for publishing the `docs/` tree through GitHub Pages.
const DEPLOY_INSTRUCTIONS: &str = r#"
Deployment to GitHub Pages:

1. Ensure your repository is initialized:
   git init (if not already done)

2. Add and commit your changes:
   git add .
   git commit -m "Build site"

3. Push to GitHub:
   git remote add origin https://github.com/USERNAME/brace-industries.git
   git branch -M main
   git push -u origin main

4. Enable GitHub Pages:
   - Go to your repository settings on GitHub
   - Navigate to "Pages" section
   - Set source to "Deploy from a branch"
   - Select branch: main
   - Select folder: /docs
   - Click Save

5. Your site will be live at:
   https://USERNAME.github.io/brace-industries/

Note: Replace USERNAME with your GitHub username.
"#;

/// Print the deployment walkthrough. No file I/O.
pub fn run() {
    println!("{}", DEPLOY_INSTRUCTIONS);
}
